// ── Rule identity and delete confirmation ──
//
// Port-map rules carry no identifier. A rule is addressed by sending its
// full body, and the appliance removes the stored rule equal to it on all
// four fields. Deletion is gated by a `Confirm` collaborator.

use crate::model::PortMapRule;

/// Asks the operator to approve a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Always approves (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Prompt naming the upper-cased protocol and external port.
pub fn delete_prompt(rule: &PortMapRule) -> String {
    format!(
        "Are you sure you want to delete the rule {}:{}?",
        rule.protocol.as_str().to_ascii_uppercase(),
        rule.external_port
    )
}

/// Whether `candidate` addresses `rule` for deletion.
pub fn same_rule(rule: &PortMapRule, candidate: &PortMapRule) -> bool {
    rule == candidate
}

/// Find the held rule a typed-in rule refers to.
///
/// An exact match wins. Otherwise the protocol is compared ignoring case,
/// so `tcp` finds a rule the appliance stored as `TCP`.
pub fn find_held<'a>(rules: &'a [PortMapRule], wanted: &PortMapRule) -> Option<&'a PortMapRule> {
    rules.iter().find(|r| same_rule(r, wanted)).or_else(|| {
        rules.iter().find(|r| {
            r.protocol.as_str().eq_ignore_ascii_case(wanted.protocol.as_str())
                && r.external_port == wanted.external_port
                && r.internal_ip == wanted.internal_ip
                && r.internal_port == wanted.internal_port
        })
    })
}
