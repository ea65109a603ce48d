//! Login, logout, and session inspection.

use dialoguer::Input;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::cli::LoginArgs;
use crate::commands::Ctx;
use crate::commands::util::prompt_err;
use crate::config::{self, Profile, SessionState};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct SessionInfo {
    profile: String,
    controller: String,
    username: Option<String>,
    token_stored: bool,
    logged_in: bool,
}

pub async fn login(ctx: &Ctx<'_>, args: LoginArgs) -> Result<(), CliError> {
    let fallback = Profile::default();
    let profile = ctx.profile.unwrap_or(&fallback);

    let resolved = if args.ask_password {
        None
    } else {
        meowtail_config::resolve_credentials(profile, ctx.profile_name).ok()
    };

    let (username, password) = if let Some((user, pass)) = resolved {
        (args.username.unwrap_or(user), pass)
    } else {
        let user = match args.username.or_else(|| profile.username.clone()) {
            Some(user) => user,
            None => Input::<String>::new()
                .with_prompt("Username")
                .interact_text()
                .map_err(prompt_err)?,
        };
        let pass = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
        (user, SecretString::from(pass))
    };

    let token = ctx
        .appliance
        .login(&username, &password)
        .await
        .map_err(ctx.fail())?;

    config::save_session(
        ctx.profile_name,
        &SessionState {
            token: Some(token.expose_secret().to_owned()),
            username: Some(username.clone()),
        },
    )?;

    if !ctx.global.quiet {
        eprintln!("✓ Logged in as {username} (profile '{}')", ctx.profile_name);
    }
    Ok(())
}

pub fn logout(ctx: &Ctx<'_>) -> Result<(), CliError> {
    ctx.appliance.logout();
    config::clear_session(ctx.profile_name)?;
    if !ctx.global.quiet {
        eprintln!("✓ Logged out (profile '{}')", ctx.profile_name);
    }
    Ok(())
}

pub async fn show(ctx: &Ctx<'_>) -> Result<(), CliError> {
    let info = SessionInfo {
        profile: ctx.profile_name.to_owned(),
        controller: ctx.appliance.config().url.to_string(),
        username: meowtail_config::load_session(ctx.profile_name)
            .ok()
            .and_then(|s| s.username),
        token_stored: ctx.appliance.session().has_token(),
        logged_in: ctx.appliance.is_logged_in().await,
    };

    let out = output::render_single(
        &ctx.global.output,
        &info,
        |i| {
            format!(
                "Profile:    {}\nController: {}\nUsername:   {}\nToken:      {}\nLogged in:  {}",
                i.profile,
                i.controller,
                i.username.as_deref().unwrap_or("-"),
                if i.token_stored { "stored" } else { "none" },
                if i.logged_in { "yes" } else { "no" },
            )
        },
        |i| i.logged_in.to_string(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}
