//! Gateway commands end to end against the in-memory store

#[cfg(test)]
mod tests {
    use crate::common::{StoreFactory, tasks};
    use crate::{assert_task_error, assert_task_ok};
    use recordops::core::commands::{Command, CommandParams};
    use recordops::core::record::{MemoryRecordStore, RecordStore};

    fn run(command: Command, lines: &[&str]) -> (Vec<String>, MemoryRecordStore) {
        let (context, store) = StoreFactory::context();
        let results = context
            .execute(command, &tasks(lines), &CommandParams::default())
            .unwrap();
        (results, store)
    }

    // ==================== Edit ====================

    #[test]
    fn test_body_edit_reports_one_outcome_per_assignment_and_saves_once() {
        let (results, store) = run(
            Command::Edit,
            &["Customer|123||firstname=Jane&lastname=Doe|set"],
        );

        assert_eq!(results.len(), 1);
        let outcomes: Vec<&str> = results[0].split(" | ").collect();
        assert_eq!(
            outcomes,
            vec![
                "Changed firstname from 'John' to 'Jane'",
                "Changed lastname from 'Smith' to 'Doe'",
            ]
        );
        assert_eq!(store.save_count(), 1);

        let record = store.load("customer", "123").unwrap();
        assert_eq!(record.text("firstname").unwrap().to_string(), "Jane");
    }

    #[test]
    fn test_edit_sublist_lines_by_index_and_filter() {
        let (results, store) = run(
            Command::Edit,
            &[
                "salesorder|500|item/-1|quantity=6|set",
                "salesorder|500|item/item=Gadget&quantity=1|amount=16.00|set",
                "salesorder|500|item/0|item=9|set",
            ],
        );

        assert_eq!(
            results,
            vec![
                "Changed quantity from '5' to '6'",
                "Changed amount from '15.00' to '16.00'",
                "Changed item from '7' to '9'",
            ]
        );
        assert_eq!(store.save_count(), 1);

        let record = store.load("salesorder", "500").unwrap();
        assert_eq!(record.sublist_text("item", "item", 0).unwrap().to_string(), "Gizmo");
        assert_eq!(record.sublist_text("item", "quantity", 2).unwrap().to_string(), "6");
    }

    #[test]
    fn test_edit_insert_appends_line() {
        let (results, store) = run(
            Command::Edit,
            &["salesorder|500|item/-0|item=Gizmo&quantity=1&amount=9.99|insert"],
        );

        assert_eq!(results, vec!["Inserted at 3 (found at 3)"]);
        let record = store.load("salesorder", "500").unwrap();
        assert_eq!(record.line_count("item").unwrap(), 4);
        assert_eq!(record.sublist_text("item", "amount", 3).unwrap().to_string(), "9.99");
    }

    #[test]
    fn test_edit_unknown_sublist_is_isolated() {
        let (results, store) = run(
            Command::Edit,
            &[
                "customer|123|contacts/0|name=x|set",
                "customer|123||companyname=ACME|set",
            ],
        );

        assert_task_error!(results[0], "Sublist not found: contacts");
        assert_task_ok!(results[1]);
        assert_eq!(store.save_count(), 1);
    }

    // ==================== Lookup ====================

    #[test]
    fn test_lookup_after_edit_sees_saved_values() {
        let (context, _) = StoreFactory::context();
        context
            .execute(
                Command::Edit,
                &tasks(&["customer|124||category=Retail|set"]),
                &CommandParams::default(),
            )
            .unwrap();

        let results = context
            .execute(
                Command::LookupFields,
                &tasks(&["customer|124||category"]),
                &CommandParams::default(),
            )
            .unwrap();
        assert_eq!(results, vec!["Retail | 1"]);
    }

    #[test]
    fn test_lookup_line_count_and_ambiguity() {
        let (results, _) = run(
            Command::LookupFields,
            &[
                "customer|123|addressbook|linecount",
                "customer|123|addressbook/label=Home|city",
                "customer|123|addressbook/label=Cabin|city",
            ],
        );

        assert_eq!(results[0], "2");
        assert_eq!(results[1], "Springfield | line 0");
        assert_task_error!(results[2], "Sublist line not found");
    }

    // ==================== Create / delete ====================

    #[test]
    fn test_create_then_delete() {
        let (context, store) = StoreFactory::context();
        let created = context
            .execute(
                Command::Create,
                &tasks(&["Customer|category=1|firstname=Ada"]),
                &CommandParams::default(),
            )
            .unwrap();
        assert!(created[0].starts_with("Internal ID: 501"));
        assert!(store.contains("customer", "501"));

        let deleted = context
            .execute(
                Command::MassDelete,
                &tasks(&["customer|501"]),
                &CommandParams::default(),
            )
            .unwrap();
        assert_eq!(deleted, vec!["Delete successful"]);
        assert!(!store.contains("customer", "501"));
    }
}
