//! Port-mapping command handlers.

use tabled::Tabled;

use meowtail_core::rule::find_held;
use meowtail_core::{DeleteOutcome, PortMapConfig, PortMapRule, Protocol, RuleDraft};

use crate::cli::{PortmapArgs, PortmapCommand};
use crate::commands::Ctx;
use crate::commands::util::PromptConfirm;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "External")]
    external_port: u16,
    #[tabled(rename = "Internal IP")]
    internal_ip: String,
    #[tabled(rename = "Internal Port")]
    internal_port: u16,
}

impl From<&PortMapRule> for RuleRow {
    fn from(r: &PortMapRule) -> Self {
        Self {
            protocol: r.protocol.as_str().to_ascii_uppercase(),
            external_port: r.external_port,
            internal_ip: r.internal_ip.clone(),
            internal_port: r.internal_port,
        }
    }
}

fn plain_rule(r: &PortMapRule) -> String {
    format!(
        "{} {} {} {}",
        r.protocol, r.external_port, r.internal_ip, r.internal_port
    )
}

fn detail(config: &PortMapConfig) -> String {
    let interface = if config.external_interface.is_empty() {
        "-"
    } else {
        &config.external_interface
    };
    let rules = if config.rules.is_empty() {
        "No rules".to_owned()
    } else {
        let rows: Vec<RuleRow> = config.rules.iter().map(RuleRow::from).collect();
        tabled::Table::new(rows)
            .with(tabled::settings::Style::rounded())
            .to_string()
    };
    format!("External interface: {interface}\n\n{rules}")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Ctx<'_>, args: PortmapArgs) -> Result<(), CliError> {
    let portmap = ctx.appliance.portmap();

    match args.command {
        PortmapCommand::Show => {
            let config = portmap.load_config().await.map_err(ctx.fail())?;
            let out = output::render_single(&ctx.global.output, config.as_ref(), detail, |c| {
                c.rules.iter().map(plain_rule).collect::<Vec<_>>().join("\n")
            });
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }

        PortmapCommand::Add {
            protocol,
            external_port,
            internal_ip,
            internal_port,
        } => {
            portmap.edit_form(|f| {
                f.draft = RuleDraft {
                    protocol,
                    external_port,
                    internal_ip,
                    internal_port,
                };
            });
            let outcome = portmap.submit_rule().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        PortmapCommand::Remove {
            protocol,
            external_port,
            internal_ip,
            internal_port,
        } => {
            let wanted = PortMapRule {
                protocol: Protocol::from(protocol),
                external_port,
                internal_ip,
                internal_port,
            };

            // Delete the rule as the appliance holds it.
            let config = portmap.load_config().await.map_err(ctx.fail())?;
            let held = find_held(&config.rules, &wanted)
                .cloned()
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "Rule".into(),
                    identifier: plain_rule(&wanted),
                    list_command: "portmap show".into(),
                })?;

            let confirm = PromptConfirm {
                yes: ctx.global.yes,
            };
            match portmap.delete_rule(&held, &confirm).await.map_err(ctx.fail())? {
                DeleteOutcome::Declined => eprintln!("Aborted"),
                DeleteOutcome::Deleted(outcome) => ctx.report(&outcome),
            }
            Ok(())
        }

        PortmapCommand::Interface { interface } => {
            portmap.edit_form(|f| f.interface = interface);
            let outcome = portmap.submit_interface().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }
    }
}
