//! Rendering as a pure function of the widget tree and the live controls

use serde_json::{json, Value};

use super::{adapter_for, FieldView};
use crate::domain::Widget;
use crate::engine::FormSession;

/// One piece of the rendered sentence
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    Text(String),
    Field(FieldView),
}

/// Walk the widget tree, following only branches whose controls are live
pub fn render(session: &FormSession<'_>) -> Vec<Segment> {
    let mut segments = Vec::new();
    render_widgets(session, session.widgets(), &mut segments);
    segments
}

fn render_widgets(session: &FormSession<'_>, widgets: &[Widget], out: &mut Vec<Segment>) {
    for widget in widgets {
        match widget {
            Widget::Text { data } => out.push(Segment::Text(data.clone())),
            Widget::FieldControl(node) => {
                let Some(control) = session.get_control(&node.field_key) else {
                    continue;
                };
                let Some(descriptor) = session.descriptor(&node.field_key) else {
                    continue;
                };
                if let Some(view) = adapter_for(&node.field_key, descriptor).view(session) {
                    out.push(Segment::Field(view));
                }
                for branch in &node.branches {
                    if branch.filter.matches(control.value()) {
                        render_widgets(session, &branch.children, out);
                    }
                }
            }
        }
    }
}

/// Single-line rendition: `[placeholder: value]` per field, `*` marks a
/// field shown as invalid and `~` a disabled one
pub fn render_text(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        let piece = match segment {
            Segment::Text(text) => text.trim().to_string(),
            Segment::Field(view) => field_text(view),
        };
        if piece.is_empty() {
            continue;
        }
        let punctuation = piece.starts_with(|c: char| matches!(c, ',' | '.' | ':' | ';' | '!' | '?'));
        if !out.is_empty() && !punctuation {
            out.push(' ');
        }
        out.push_str(&piece);
    }
    out
}

fn field_text(view: &FieldView) -> String {
    let mut text = String::new();
    if view.disabled {
        text.push('~');
    }
    match &view.display {
        Some(display) => text.push_str(&format!("[{}: {}]", view.placeholder, display)),
        None => text.push_str(&format!("[{}]", view.placeholder)),
    }
    if view.show_invalid {
        text.push('*');
    }
    text
}

/// Machine-readable report of the session
pub fn render_json(session: &FormSession<'_>) -> Value {
    let controls: Vec<Value> = session
        .controls()
        .map(|control| {
            json!({
                "key": control.key(),
                "value": control.value(),
                "valid": control.is_valid(),
                "touched": control.is_touched(),
                "dirty": control.is_dirty(),
                "disabled": control.is_disabled(),
                "errors": control.errors(),
            })
        })
        .collect();

    json!({
        "text": render_text(&render(session)),
        "valid": session.is_valid(),
        "submitted": session.is_submitted(),
        "value": session.value(),
        "controls": controls,
    })
}
