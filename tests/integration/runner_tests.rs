//! Batch runner driving the gateway commands in-process

#[cfg(test)]
mod tests {
    use crate::common::{LocalTransport, StoreFactory};
    use recordops::core::batch::{BatchRunner, TaskQueue, TaskState, progress_line, to_csv};
    use recordops::core::commands::{Command, CommandParams};

    #[tokio::test]
    async fn test_same_record_edits_share_one_request() {
        let (context, store) = StoreFactory::context();
        let transport = LocalTransport::new(context);
        let runner = BatchRunner::new(&transport, Command::Edit);

        let mut queue = TaskQueue::from_lines(
            Command::Edit,
            "Customer|124||firstname=Janet|set\n\
             Customer|123||firstname=Jane|set\n\
             customer|123||lastname=Doe|set\n",
        );
        let summary = runner.run(&mut queue, |_| {}).await;

        assert_eq!(transport.requests(), vec![1, 2]);
        assert_eq!(summary.requests, 2);
        assert_eq!(summary.completed, 3);
        assert_eq!(store.save_count(), 2);
        assert_eq!(
            queue.tasks()[2].status(),
            "Changed lastname from 'Smith' to 'Doe'"
        );
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_run() {
        let (context, _) = StoreFactory::context();
        let transport = LocalTransport::new(context);
        let runner = BatchRunner::new(&transport, Command::MassSave);

        let mut queue = TaskQueue::from_lines(
            Command::MassSave,
            "customer|999\n\ncustomer|123\n",
        );
        let mut progress = Vec::new();
        let summary = runner
            .run(&mut queue, |queue| progress.push(progress_line(queue)))
            .await;

        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(queue.tasks()[0].state, TaskState::Failed);
        assert_eq!(queue.tasks()[1].status(), "Edit/Save");
        assert_eq!(progress, vec!["Progress: 1 of 2", "Progress: 2 of 2"]);

        let csv = to_csv(&queue).unwrap();
        assert!(csv.ends_with("2,\"customer|123\",\"Edit/Save\"\r\n"));
    }

    #[tokio::test]
    async fn test_request_level_error_fails_the_task() {
        let (context, _) = StoreFactory::context();
        let transport = LocalTransport::new(context);
        let runner = BatchRunner::new(&transport, Command::RecordType);

        let mut queue = TaskQueue::from_lines(Command::RecordType, "Customer\nSales Order\n");
        runner.run(&mut queue, |_| {}).await;

        assert!(
            queue.tasks()[0]
                .status()
                .starts_with("Error 400: Error: Invalid argument: Record ID not specified")
        );
        assert_eq!(queue.tasks()[1].state, TaskState::Failed);
    }

    #[tokio::test]
    async fn test_record_type_detection_with_record_param() {
        let (context, _) = StoreFactory::context();
        let transport = LocalTransport::new(context);
        let runner = BatchRunner::new(&transport, Command::RecordType).with_params(CommandParams {
            record: Some("500".to_string()),
        });

        let mut queue = TaskQueue::from_lines(Command::RecordType, "Customer\nSales Order\n");
        runner.run(&mut queue, |_| {}).await;

        assert_eq!(queue.tasks()[0].state, TaskState::Completed);
        assert!(queue.tasks()[0].status().starts_with("No: "));
        assert_eq!(queue.tasks()[1].status(), "Yes");
    }
}
