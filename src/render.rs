//! Plain-text rendering of suggestions and query results.

use crate::location::ValidationError;
use crate::sky::{ObjectKind, QueryPhase, QueryState, SkyObject};

/// Glyph shown next to an object name.
pub fn glyph(kind: ObjectKind) -> &'static str {
    match kind {
        ObjectKind::Star => "\u{2605}",
        ObjectKind::Planet => "\u{25C9}",
        ObjectKind::Moon => "\u{263E}",
        ObjectKind::Sun => "\u{2609}",
        ObjectKind::Other => "\u{2727}",
    }
}

pub fn render_suggestions(names: &[&str]) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(&format!("  \u{25B8} {}\n", name));
    }
    out
}

/// One card per object.
pub fn render_object(obj: &SkyObject) -> String {
    let mut out = String::new();
    out.push_str(&format!("  {} {} ({})\n", glyph(obj.kind), obj.name, obj.kind));
    out.push_str(&format!("    Constellation: {}\n", obj.constellation));
    out.push_str(&format!("    Altitude: {:.1}\u{00B0}\n", obj.altitude_deg));
    out.push_str(&format!("    Azimuth: {:.1}\u{00B0}\n", obj.azimuth_deg));
    if let Some(mag) = obj.magnitude {
        out.push_str(&format!("    Magnitude: {:.1}\n", mag));
    }
    if let Some(phase) = obj.phase_percent {
        out.push_str(&format!("    Phase: {:.0}%\n", phase));
    }
    out
}

/// The whole result area: input error, query error, loading line or cards.
///
/// The input error is independent of the query state and shown on top.
pub fn render_view(input_error: Option<ValidationError>, state: &QueryState) -> String {
    let mut out = String::new();

    if let Some(err) = input_error {
        out.push_str(&format!("  \u{26A0} {}\n", err));
    }
    if let Some(ref msg) = state.error_message {
        out.push_str(&format!("  \u{2716} {}\n", msg));
    }

    match state.phase {
        QueryPhase::Idle => {}
        QueryPhase::Loading => out.push_str("  Loading celestial objects...\n"),
        QueryPhase::Success | QueryPhase::Failed => {
            if state.phase == QueryPhase::Success && state.objects.is_empty() {
                out.push_str("  No objects above the horizon.\n");
            }
            if let Some(at) = state.coordinate {
                if !state.objects.is_empty() {
                    out.push_str(&format!("  Sky over {}\n\n", at));
                }
            }
            for (i, obj) in state.objects.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                out.push_str(&render_object(obj));
            }
        }
    }
    out
}
