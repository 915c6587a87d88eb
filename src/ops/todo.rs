use crate::model::{TodoState, toggle_todo};

/// Error type for checkbox toggling
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("line {line} out of range (1-{max})")]
    LineOutOfRange { line: usize, max: usize },
    #[error("line {line} is not a todo item (missing [ ] or [x])")]
    NotACheckbox { line: usize },
}

/// Toggle the checkbox on the given 1-based line of `content`.
/// Returns the rewritten content and the line's new state. The input is
/// returned untouched in every error case.
pub fn toggle_line(content: &str, line_no: usize) -> Result<(String, TodoState), TodoError> {
    let mut lines: Vec<&str> = content.lines().collect();
    let max = lines.len();
    if line_no < 1 || line_no > max {
        return Err(TodoError::LineOutOfRange { line: line_no, max });
    }

    let toggled = toggle_todo(lines[line_no - 1])
        .ok_or(TodoError::NotACheckbox { line: line_no })?;
    let (new_line, state) = toggled;
    lines[line_no - 1] = &new_line;

    let mut out = lines.join("\n");
    if content.ends_with('\n') {
        out.push('\n');
    }
    Ok((out, state))
}
