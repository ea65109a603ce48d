//! Clap derive structures for the `meowtail` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// meowtail -- control udhcpd and port forwarding on a meowtail appliance
#[derive(Debug, Parser)]
#[command(
    name = "meowtail",
    version,
    about = "Manage udhcpd and port mapping on a meowtail appliance",
    long_about = "Edit the DHCP server and the NAT port-forwarding table of a \
        meowtail appliance.\n\n\
        Every change is sent as one request and followed by a fresh read of \
        the appliance's configuration.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Appliance profile to use
    #[arg(long, short = 'p', env = "MEOWTAIL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Appliance URL (overrides profile)
    #[arg(long, short = 'c', env = "MEOWTAIL_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MEOWTAIL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "MEOWTAIL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile, default 30)
    #[arg(long, env = "MEOWTAIL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store a session token for the profile
    Login(LoginArgs),

    /// Forget the session token for the profile
    Logout,

    /// Show whether the stored session is accepted
    Session,

    /// Manage the udhcpd DHCP server
    #[command(alias = "d")]
    Dhcp(DhcpArgs),

    /// Manage NAT port-forwarding rules
    #[command(alias = "pm")]
    Portmap(PortmapArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SESSION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (defaults to the profile's username)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Prompt for the password even if one is configured
    #[arg(long)]
    pub ask_password: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DHCP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DhcpArgs {
    #[command(subcommand)]
    pub command: DhcpCommand,
}

#[derive(Debug, Subcommand)]
pub enum DhcpCommand {
    /// Show whether udhcpd is running
    Status,

    /// Start udhcpd
    Start,

    /// Stop udhcpd
    Stop,

    /// Restart udhcpd
    Restart,

    /// Show the current configuration
    Show,

    /// Set the address pool
    Range {
        /// First address handed out
        start: String,
        /// Last address handed out
        end: String,
    },

    /// Set the default gateway (router option)
    Gateway { gateway: String },

    /// Set the subnet mask
    Subnet { subnet: String },

    /// Set the interface udhcpd listens on
    Interface { interface: String },

    /// Manage DNS servers
    Dns(DnsArgs),

    /// Manage static leases
    #[command(alias = "leases")]
    Lease(LeaseArgs),
}

#[derive(Debug, Args)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub command: DnsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// List configured DNS servers
    Show,

    /// Replace the DNS server list
    Set {
        /// Servers in order; blank entries are dropped
        #[arg(required = true)]
        servers: Vec<String>,
    },

    /// Remove every DNS server
    Clear,

    /// Edit the list interactively
    Edit,
}

#[derive(Debug, Args)]
pub struct LeaseArgs {
    #[command(subcommand)]
    pub command: LeaseCommand,
}

#[derive(Debug, Subcommand)]
pub enum LeaseCommand {
    /// List static leases
    #[command(alias = "ls")]
    List,

    /// Add a static lease
    Add {
        /// Client MAC address
        mac: String,
        /// Reserved IP address
        ip: String,
    },

    /// Remove a static lease by MAC
    #[command(alias = "rm")]
    Remove { mac: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PORT MAPPING
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PortmapArgs {
    #[command(subcommand)]
    pub command: PortmapCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortmapCommand {
    /// Show the external interface and all rules
    Show,

    /// Add a forwarding rule
    Add {
        /// tcp or udp
        #[arg(long, default_value = "tcp")]
        protocol: String,

        /// Port on the external interface
        #[arg(long, short = 'e', default_value = "8080")]
        external_port: String,

        /// Destination host on the LAN
        #[arg(long, short = 'i', default_value = "192.168.1.100")]
        internal_ip: String,

        /// Destination port on the LAN host
        #[arg(long, short = 'n', default_value = "80")]
        internal_port: String,
    },

    /// Remove the rule matching all four fields
    #[command(alias = "rm")]
    Remove {
        /// tcp or udp
        protocol: String,
        external_port: u16,
        internal_ip: String,
        internal_port: u16,
    },

    /// Set the external (WAN) interface
    Interface { interface: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
