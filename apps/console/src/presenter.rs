use accord_application::{ConflictPresentation, ConstraintRow, RenderedPage, RevealSink};

/// Prints each revealed constraint row as soon as the queue releases it.
pub struct StdoutRevealSink;

impl RevealSink for StdoutRevealSink {
    fn reveal(&self, row: ConstraintRow) {
        println!("{}", format_constraint_row(&row));
    }
}

pub fn format_constraint_row(row: &ConstraintRow) -> String {
    let constraint = &row.constraint;
    format!(
        "{:>4}  {} | {} | {} | {} | {}",
        row.number,
        constraint.time_stamp(),
        constraint.constraint_owner(),
        constraint.constraint_target(),
        constraint.file(),
        constraint.constraint()
    )
}

/// Renders a page of log rows followed by its page controls.
pub fn format_page(page: &RenderedPage) -> Vec<String> {
    let mut lines: Vec<String> = page
        .rows
        .iter()
        .map(|row| {
            format!(
                "{:>4}  {} | {} | {} | {}",
                row.number,
                row.entry.time(),
                row.entry.activity(),
                row.entry.resource(),
                row.entry.actor()
            )
        })
        .collect();

    let controls: Vec<String> = page
        .controls
        .iter()
        .map(|control| {
            if control.active {
                format!("[{}]", control.page)
            } else {
                control.page.to_string()
            }
        })
        .collect();
    lines.push(format!(
        "page {} of {}: {}",
        page.current_page,
        page.total_pages,
        controls.join(" ")
    ));

    lines
}

pub fn format_conflicts(presentation: &ConflictPresentation) -> Vec<String> {
    match presentation {
        ConflictPresentation::Hidden => Vec::new(),
        ConflictPresentation::Loading => vec!["Detecting conflicts...".to_owned()],
        ConflictPresentation::Modal {
            detection_time,
            pairs,
        } => std::iter::once(detection_time.clone())
            .chain(pairs.iter().map(|pair| pair.to_row().join(" | ")))
            .collect(),
        ConflictPresentation::NoConflicts { detection_time } => {
            vec![detection_time.clone(), "No conflicts detected".to_owned()]
        }
        ConflictPresentation::Alert(message) => vec![message.clone()],
    }
}
