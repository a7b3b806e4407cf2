// Plain-text rendering of reports, targeted lists and source status.

use std::fmt::Write as _;

use pickwise_app::protocol::SourceStatus;
use pickwise_core::attribute::Attribute;
use pickwise_core::catalog::Role;
use pickwise_core::engine::ranker::TargetedCandidate;
use pickwise_core::engine::Report;
use pickwise_core::roster::{RosterState, Side};

/// Candidates shown in the general list.
pub const SHOWN_CANDIDATES: usize = 10;

/// Candidates shown for a targeted query.
pub const SHOWN_TARGETED: usize = 8;

fn roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|r| r.display_str())
        .collect::<Vec<_>>()
        .join("/")
}

fn row(roster: &RosterState, side: Side) -> String {
    roster
        .slots(side)
        .iter()
        .map(|slot| slot.as_deref().unwrap_or("-"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn attr_list(attrs: &[Attribute]) -> String {
    if attrs.is_empty() {
        "none".to_string()
    } else {
        attrs.iter().map(|a| a.label()).collect::<Vec<_>>().join(", ")
    }
}

pub fn render_report(roster: &RosterState, report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Draft ({} side): phase {} ({}), strictness {}, role filter {}",
        roster.team_side.label(),
        report.phase,
        report.phase_mode,
        report.strictness.label(),
        report.role,
    );
    let _ = writeln!(out, "  ally      {}", row(roster, Side::Ally));
    let _ = writeln!(out, "  enemy     {}", row(roster, Side::Enemy));
    let _ = writeln!(out, "  blue bans {}", row(roster, Side::BanBlue));
    let _ = writeln!(out, "  red bans  {}", row(roster, Side::BanRed));
    let _ = writeln!(
        out,
        "Team score {}/100: {} ({})",
        report.score, report.verdict_label, report.verdict_description
    );
    let _ = writeln!(out, "Lacking: {}", attr_list(&report.lacking));
    let _ = writeln!(out, "Open role: {}", report.open_role);

    if report.candidates.is_empty() {
        let _ = writeln!(out, "No candidates available.");
        return out;
    }
    let _ = writeln!(out, "Best picks:");
    for (i, c) in report.candidates.iter().take(SHOWN_CANDIDATES).enumerate() {
        let _ = write!(out, "{:>3}. {:<14} {:>7.1}  [{}]", i + 1, c.id, c.score, roles(&c.roles));
        if !c.reasons.is_empty() {
            let _ = write!(out, "  {}", c.reasons.join("; "));
        }
        out.push('\n');
    }
    out
}

pub fn render_targeted(attr: Attribute, candidates: &[TargetedCandidate]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Best picks for {}:", attr.label());
    if candidates.is_empty() {
        let _ = writeln!(out, "  none available");
        return out;
    }
    for (i, c) in candidates.iter().take(SHOWN_TARGETED).enumerate() {
        let stars = "*".repeat(usize::from(c.grade.stars()));
        let _ = write!(
            out,
            "{:>3}. {:<14} {:<2} {:<5} [{}]",
            i + 1,
            c.id,
            c.grade.label(),
            stars,
            roles(&c.roles)
        );
        if !c.reasons.is_empty() {
            let _ = write!(out, "  {}", c.reasons.join("; "));
        }
        out.push('\n');
    }
    out
}

pub fn render_status(status: &SourceStatus) -> String {
    let lobby = if status.session_available {
        "connected"
    } else {
        "searching"
    };
    let catalog = if status.catalog_available {
        "live"
    } else {
        "curated only"
    };
    let mut line = format!(
        "Lobby {lobby}; catalog {catalog}, patch {}",
        status.patch.as_deref().unwrap_or("unknown")
    );
    if let Some(at) = status.last_snapshot {
        let _ = write!(line, "; last sync {}", at.format("%H:%M:%S"));
    }
    line
}
