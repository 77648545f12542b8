use super::*;
use serde_json::json;

fn goal(progress: f64) -> SavingsGoal {
    SavingsGoal {
        id: 1,
        goal_name: "School fees".to_owned(),
        description: None,
        target_amount: 1000.0,
        current_amount: 450.0,
        target_date: "2027-01-10".to_owned(),
        status: "ACTIVE".to_owned(),
        progress_percentage: progress,
        created_at: None,
    }
}

#[test]
fn progress_label_rounds_and_clamps() {
    assert_eq!(progress_label(&goal(45.4)), "45%");
    assert_eq!(progress_label(&goal(130.0)), "100%");
    assert_eq!(progress_label(&goal(-3.0)), "0%");
}

#[test]
fn loan_summary_reads_either_spelling() {
    let snake = json!({"loan_type": "EMERGENCY", "amount": 1500.0, "status": "APPROVED"});
    assert_eq!(
        loan_summary(&snake),
        ("EMERGENCY".to_owned(), "KES 1,500.00".to_owned(), "APPROVED".to_owned())
    );

    let camel = json!({"loanType": "DEVELOPMENT", "principal": 20000});
    assert_eq!(loan_summary(&camel), ("DEVELOPMENT".to_owned(), "KES 20,000.00".to_owned(), "-".to_owned()));
}

#[test]
fn loan_summary_tolerates_missing_fields() {
    assert_eq!(loan_summary(&json!({})), ("-".to_owned(), "-".to_owned(), "-".to_owned()));
}
