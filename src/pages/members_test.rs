use super::*;

fn member(number: &str, status: MemberStatus) -> Member {
    Member {
        id: 1,
        member_number: number.to_owned(),
        first_name: "Otieno".to_owned(),
        last_name: "Kamau".to_owned(),
        email: None,
        phone_number: None,
        status,
        date_joined: None,
        total_savings: 0.0,
        loan_balance: 0.0,
        savings_balance: 0.0,
        roles: Vec::new(),
    }
}

#[test]
fn status_action_offers_the_opposite_state() {
    assert_eq!(status_action(MemberStatus::Active), Some(MemberAction::Suspend));
    assert_eq!(status_action(MemberStatus::Suspended), Some(MemberAction::Activate));
    assert_eq!(status_action(MemberStatus::Inactive), Some(MemberAction::Activate));
    assert_eq!(status_action(MemberStatus::Pending), None);
    assert_eq!(status_action(MemberStatus::Unknown), None);
}

#[test]
fn page_summary_is_one_based() {
    let page = Page { content: vec![member("MB1", MemberStatus::Active)], total_elements: 47, total_pages: 5, number: 1 };
    assert_eq!(page_summary(&page), "Page 2 of 5 (47 members)");

    let empty: Page<Member> = Page { content: Vec::new(), total_elements: 0, total_pages: 0, number: 0 };
    assert_eq!(page_summary(&empty), "Page 1 of 1 (0 members)");
}

#[test]
fn replace_member_swaps_matching_row() {
    let mut rows = vec![member("MB1", MemberStatus::Active), member("MB2", MemberStatus::Active)];
    replace_member(&mut rows, member("MB2", MemberStatus::Suspended));
    assert_eq!(rows[0].status, MemberStatus::Active);
    assert_eq!(rows[1].status, MemberStatus::Suspended);

    replace_member(&mut rows, member("MB9", MemberStatus::Pending));
    assert_eq!(rows.len(), 2);
}

#[test]
fn member_details_fill_gaps_with_dash() {
    let mut m = member("MB7", MemberStatus::Suspended);
    m.email = Some("otieno@example.test".to_owned());
    m.phone_number = Some("  ".to_owned());
    m.loan_balance = 1200.0;

    let rows = member_details(&m);

    assert_eq!(rows[0], ("Member number", "MB7".to_owned()));
    assert_eq!(rows[1], ("Name", "Otieno Kamau".to_owned()));
    assert_eq!(rows[2], ("Email", "otieno@example.test".to_owned()));
    assert_eq!(rows[3], ("Phone", "-".to_owned()));
    assert_eq!(rows[4], ("Status", "Suspended".to_owned()));
    assert_eq!(rows[5], ("Joined", "-".to_owned()));
    assert_eq!(rows[7], ("Loan balance", "KES 1,200.00".to_owned()));
}
