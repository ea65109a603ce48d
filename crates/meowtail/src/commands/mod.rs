//! Command dispatch: bridges CLI args -> core managers -> output formatting.

pub mod config_cmd;
pub mod dhcp;
pub mod portmap;
pub mod session;
pub mod util;

use meowtail_core::{Appliance, CoreError, MutationOutcome};

use crate::cli::{Command, GlobalOpts};
use crate::config::Profile;
use crate::error::CliError;
use crate::output;

/// Everything an appliance-bound handler needs.
pub struct Ctx<'a> {
    pub appliance: &'a Appliance,
    pub global: &'a GlobalOpts,
    pub profile_name: &'a str,
    pub profile: Option<&'a Profile>,
}

impl Ctx<'_> {
    /// Error mapper naming the active profile and effective timeout.
    pub fn fail(&self) -> impl Fn(CoreError) -> CliError + '_ {
        move |e| {
            CliError::from_core(
                e,
                self.profile_name,
                self.appliance.config().timeout.as_secs(),
            )
        }
    }

    /// Print a mutation result. Table mode stays silent; the notifier
    /// already reported the status line on stderr.
    pub fn report(&self, outcome: &MutationOutcome) {
        let out = output::render_single(
            &self.global.output,
            outcome,
            |_| String::new(),
            |o| o.status.clone(),
        );
        output::print_output(&out, self.global.quiet);
    }
}

/// Dispatch an appliance-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Ctx<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => session::login(ctx, args).await,
        Command::Logout => session::logout(ctx),
        Command::Session => session::show(ctx).await,
        Command::Dhcp(args) => dhcp::handle(ctx, args).await,
        Command::Portmap(args) => portmap::handle(ctx, args).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
