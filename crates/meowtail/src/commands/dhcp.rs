//! udhcpd command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use dialoguer::{Input, Select};
use serde::Serialize;
use tabled::Tabled;

use meowtail_core::{DhcpConfig, DhcpManager, Lease, ServiceStatus};

use crate::cli::{DhcpArgs, DhcpCommand, DnsCommand, LeaseCommand};
use crate::commands::Ctx;
use crate::commands::util::prompt_err;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct LeaseRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
}

impl From<&Lease> for LeaseRow {
    fn from(l: &Lease) -> Self {
        Self {
            mac: l.mac.clone(),
            ip: l.ip.clone(),
        }
    }
}

/// A DNS server with its 1-based position. Serializes as the bare address.
#[derive(Serialize)]
#[serde(transparent)]
struct DnsEntry {
    #[serde(skip)]
    index: usize,
    server: String,
}

#[derive(Tabled)]
struct DnsRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Server")]
    server: String,
}

impl From<&DnsEntry> for DnsRow {
    fn from(e: &DnsEntry) -> Self {
        Self {
            index: e.index,
            server: e.server.clone(),
        }
    }
}

/// `dhcp show` payload for structured output.
#[derive(Serialize)]
struct DhcpView<'a> {
    running: bool,
    #[serde(flatten)]
    config: &'a DhcpConfig,
    loaded_at: Option<DateTime<Utc>>,
}

fn dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn detail(view: &DhcpView<'_>) -> String {
    let c = view.config;
    let mut lines = vec![
        format!(
            "Status:     {}",
            if view.running { "running" } else { "stopped" }
        ),
        format!("Range:      {} - {}", dash(&c.range.start), dash(&c.range.end)),
        format!("Gateway:    {}", dash(&c.gateway)),
        format!("Subnet:     {}", dash(&c.subnet)),
        format!("Interface:  {}", dash(&c.interface)),
        format!(
            "DNS:        {}",
            if c.dns_servers.is_empty() {
                "-".to_owned()
            } else {
                c.dns_servers.join(", ")
            }
        ),
    ];
    if c.static_leases.is_empty() {
        lines.push("Leases:     -".into());
    } else {
        lines.push("Leases:".into());
        lines.extend(c.static_leases.iter().map(|l| format!("  {}  {}", l.mac, l.ip)));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Ctx<'_>, args: DhcpArgs) -> Result<(), CliError> {
    let dhcp = ctx.appliance.dhcp();

    match args.command {
        DhcpCommand::Status => {
            let status = dhcp.reload_status().await;
            let out = output::render_single(
                &ctx.global.output,
                &status,
                |s: &ServiceStatus| {
                    format!(
                        "udhcpd is {}",
                        if s.running { "running" } else { "stopped" }
                    )
                },
                |s| s.running.to_string(),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }

        DhcpCommand::Start => {
            let outcome = dhcp.start().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        DhcpCommand::Stop => {
            let outcome = dhcp.stop().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        DhcpCommand::Restart => {
            let outcome = dhcp.restart().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        DhcpCommand::Show => {
            let config = dhcp.activate().await.map_err(ctx.fail())?;
            let view = DhcpView {
                running: dhcp.status().running,
                config: &config,
                loaded_at: dhcp.loaded_at(),
            };
            let out = output::render_single(&ctx.global.output, &view, detail, |v| {
                format!("{} {}", v.config.range.start, v.config.range.end)
            });
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }

        DhcpCommand::Range { start, end } => {
            dhcp.edit_form(|f| {
                f.range_start = start;
                f.range_end = end;
            });
            let outcome = dhcp.submit_range().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        DhcpCommand::Gateway { gateway } => {
            dhcp.edit_form(|f| f.gateway = gateway);
            let outcome = dhcp.submit_gateway().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        DhcpCommand::Subnet { subnet } => {
            dhcp.edit_form(|f| f.subnet = subnet);
            let outcome = dhcp.submit_subnet().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        DhcpCommand::Interface { interface } => {
            dhcp.edit_form(|f| f.interface = interface);
            let outcome = dhcp.submit_interface().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        DhcpCommand::Dns(args) => dns(ctx, dhcp, args.command).await,
        DhcpCommand::Lease(args) => lease(ctx, dhcp, args.command).await,
    }
}

// ── DNS ─────────────────────────────────────────────────────────────

async fn dns(ctx: &Ctx<'_>, dhcp: &DhcpManager, cmd: DnsCommand) -> Result<(), CliError> {
    match cmd {
        DnsCommand::Show => {
            let config = dhcp.load_config().await.map_err(ctx.fail())?;
            let entries: Vec<DnsEntry> = config
                .dns_servers
                .iter()
                .enumerate()
                .map(|(i, server)| DnsEntry {
                    index: i + 1,
                    server: server.clone(),
                })
                .collect();
            let out = output::render_list(
                &ctx.global.output,
                &entries,
                |e| DnsRow::from(e),
                |e| e.server.clone(),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }

        DnsCommand::Set { servers } => {
            dhcp.edit_form(|f| f.dns.replace_all(&servers));
            let outcome = dhcp.submit_dns().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        DnsCommand::Clear => {
            let outcome = dhcp.set_dns(&[]).await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        DnsCommand::Edit => edit_dns(ctx, dhcp).await,
    }
}

/// Interactive slot editor. Loading the config rebuilds the slots; nothing
/// is sent until "Save".
async fn edit_dns(ctx: &Ctx<'_>, dhcp: &DhcpManager) -> Result<(), CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "interactive".into(),
            reason: "dns edit needs a terminal; use `dhcp dns set` instead".into(),
        });
    }

    dhcp.load_config().await.map_err(ctx.fail())?;

    loop {
        let slots = dhcp.form().dns;
        let count = slots.len();

        let mut items: Vec<String> = slots
            .slots()
            .iter()
            .enumerate()
            .map(|(i, s)| format!("Edit #{}: {}", i + 1, if s.is_empty() { "(empty)" } else { s }))
            .collect();
        items.extend(["Add server", "Remove server", "Save", "Cancel"].map(String::from));

        let choice = Select::new()
            .with_prompt("DNS servers")
            .items(&items)
            .default(count + 2)
            .interact()
            .map_err(prompt_err)?;

        match choice.checked_sub(count) {
            None => {
                let value: String = Input::new()
                    .with_prompt(format!("DNS server #{}", choice + 1))
                    .with_initial_text(slots.slots()[choice].clone())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_err)?;
                dhcp.edit_form(|f| f.dns.set(choice, value));
            }
            Some(0) => dhcp.edit_form(|f| f.dns.push_empty()),
            Some(1) => {
                let index = Select::new()
                    .with_prompt("Remove which server?")
                    .items(slots.slots())
                    .default(count - 1)
                    .interact()
                    .map_err(prompt_err)?;
                dhcp.edit_form(|f| f.dns.remove_at(index));
            }
            Some(2) => {
                let outcome = dhcp.submit_dns().await.map_err(ctx.fail())?;
                ctx.report(&outcome);
                return Ok(());
            }
            Some(_) => {
                eprintln!("Aborted");
                return Ok(());
            }
        }
    }
}

// ── Static leases ───────────────────────────────────────────────────

async fn lease(ctx: &Ctx<'_>, dhcp: &DhcpManager, cmd: LeaseCommand) -> Result<(), CliError> {
    match cmd {
        LeaseCommand::List => {
            let config = dhcp.load_config().await.map_err(ctx.fail())?;
            let out = output::render_list(
                &ctx.global.output,
                &config.static_leases,
                |l| LeaseRow::from(l),
                |l| l.mac.clone(),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }

        LeaseCommand::Add { mac, ip } => {
            dhcp.edit_form(|f| {
                f.lease_mac = mac;
                f.lease_ip = ip;
            });
            let outcome = dhcp.submit_lease().await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }

        LeaseCommand::Remove { mac } => {
            let outcome = dhcp.remove_lease(&mac).await.map_err(ctx.fail())?;
            ctx.report(&outcome);
            Ok(())
        }
    }
}
