use crate::core::format::format_date;
use crate::domain::model::{ApprovalStep, ExpenseView};
use std::fmt::Write;

const NOT_AVAILABLE: &str = "N/A";

/// Plain-text body of the expense detail overlay.
pub fn render_expense_detail(expense: &ExpenseView) -> String {
    let mut out = String::new();
    let description = expense
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NOT_AVAILABLE);

    // writing into a String cannot fail
    let _ = writeln!(out, "Expense Information");
    let _ = writeln!(out, "  Description: {}", description);
    let _ = writeln!(out, "  Amount:      {} {}", expense.currency, expense.amount);
    let _ = writeln!(out, "  Date:        {}", format_date(&expense.expense_date));
    let _ = writeln!(out, "  Category:    {}", expense.category);
    let _ = writeln!(out, "  Employee:    {}", expense.employee);
    let _ = writeln!(out, "  Status:      [{}]", expense.status);
    let _ = writeln!(out);
    let _ = writeln!(out, "Approval Workflow");

    if expense.approvals.is_empty() {
        let _ = writeln!(out, "  No approval workflow defined.");
    } else {
        for (index, step) in expense.approvals.iter().enumerate() {
            render_step(&mut out, index + 1, step);
        }
    }
    out
}

fn render_step(out: &mut String, number: usize, step: &ApprovalStep) {
    let _ = writeln!(out, "  Step {}: {} [{}]", number, step.approver, step.status);
    if let Some(comments) = step.comments.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "    {}", comments);
    }
    if let Some(at) = step.approved_at.as_deref() {
        let _ = writeln!(out, "    Date: {}", format_date(at));
    }
}
