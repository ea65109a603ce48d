//! Config subcommand handlers.

use dialoguer::{Input, Select};
use secrecy::SecretString;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::commands::util::prompt_err;
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "********";

fn detail(cfg: &Config) -> String {
    let mut lines = vec![
        format!(
            "Default profile: {}",
            cfg.default_profile.as_deref().unwrap_or("-")
        ),
        format!(
            "Defaults:        output={} insecure={} timeout={}s",
            cfg.defaults.output, cfg.defaults.insecure, cfg.defaults.timeout
        ),
    ];

    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let Some(p) = cfg.profiles.get(name) else {
            continue;
        };
        lines.push(String::new());
        lines.push(format!("[{name}]"));
        lines.push(format!("  controller = {}", p.controller));
        if let Some(ref user) = p.username {
            lines.push(format!("  username   = {user}"));
        }
        if let Some(ref pw) = p.password {
            lines.push(format!("  password   = {pw}"));
        }
        if let Some(ref env) = p.password_env {
            lines.push(format!("  password_env = {env}"));
        }
        if let Some(ref ca) = p.ca_cert {
            lines.push(format!("  ca_cert    = {}", ca.display()));
        }
        if let Some(insecure) = p.insecure {
            lines.push(format!("  insecure   = {insecure}"));
        }
        if let Some(timeout) = p.timeout {
            lines.push(format!("  timeout    = {timeout}"));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            for profile in cfg.profiles.values_mut() {
                if profile.password.is_some() {
                    profile.password = Some(MASK.into());
                }
            }
            let out = output::render_single(&global.output, &cfg, detail, |_| {
                config::config_path().display().to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

/// Interactive wizard. Adds (or replaces) one profile in the existing file.
fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("meowtail configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let controller: String = Input::new()
        .with_prompt("Appliance URL")
        .default("http://192.168.1.1:81".into())
        .interact_text()
        .map_err(prompt_err)?;
    if controller.parse::<url::Url>().is_err() {
        return Err(CliError::Validation {
            field: "controller".into(),
            reason: format!("invalid URL: {controller}"),
        });
    }

    let username: String = Input::new()
        .with_prompt("Username (blank to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let password = if username.is_empty() {
        None
    } else {
        let pass = rpassword::prompt_password("Password (blank to skip): ").map_err(prompt_err)?;
        if pass.is_empty() {
            None
        } else {
            let store_choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
            ];
            let store_selection = Select::new()
                .with_prompt("Where to store the password?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            if store_selection == 0 {
                meowtail_config::store_password(&profile_name, &SecretString::from(pass))?;
                eprintln!("   ✓ Password stored in system keyring");
                None
            } else {
                Some(pass)
            }
        }
    };

    let profile = Profile {
        controller,
        username: (!username.is_empty()).then_some(username),
        password,
        ..Profile::default()
    };

    let mut cfg = config::load_config_or_default();
    cfg.profiles.insert(profile_name.clone(), profile);
    if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
        cfg.default_profile = Some(profile_name.clone());
    }
    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Profile: {profile_name}");
    eprintln!("\n  Next: meowtail login -p {profile_name}");
    Ok(())
}
