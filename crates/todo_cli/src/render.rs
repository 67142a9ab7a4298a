use std::fmt::Write;
use todo_core::{CardView, TaskCounts};

pub fn header(counts: TaskCounts) -> String {
    format!(
        "All todos: {}  Done: {}  Left: {}\n",
        counts.total, counts.done, counts.left
    )
}

pub fn card(card: &CardView) -> String {
    let mark = if card.is_done { "[x]" } else { "[ ]" };
    let overdue = if card.is_overdue { "  OVERDUE" } else { "" };

    let mut out = String::new();
    let _ = writeln!(out, "{mark} {}{overdue}", card.title);
    let _ = writeln!(out, "    id: {}", card.id);
    let _ = writeln!(out, "    {}", card.text);
    let _ = writeln!(out, "    Completion date: {}", card.due_label);
    if card.has_files() {
        let _ = writeln!(out, "    Attached files:");
        for (index, file) in card.files.iter().enumerate() {
            let _ = writeln!(out, "      {index}: {} <{}>", file.name, file.url);
        }
    }
    out
}
