//! reqwest client against a wiremock gateway

#[cfg(test)]
mod tests {
    use recordops::RecordOpsError;
    use recordops::core::batch::{BatchRunner, CommandTransport, TaskQueue, TaskState};
    use recordops::core::commands::{Command, CommandParams, RecordDetails};
    use recordops::sdk::CommandClient;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> CommandClient {
        CommandClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_tasks_with_record_param() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/commands/record-type"))
            .and(query_param("record", "42"))
            .and(body_json(vec!["Customer", "Sales Order"]))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec!["Yes", "No: nope"]))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client(&server)
            .send(
                Command::RecordType,
                &CommandParams {
                    record: Some("42".to_string()),
                },
                vec!["Customer".to_string(), "Sales Order".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(reply.status, 200);
        let results: Vec<String> = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(results, vec!["Yes", "No: nope"]);
    }

    #[tokio::test]
    async fn test_runner_over_http_groups_and_degrades() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/commands/edit"))
            .and(body_json(vec!["customer|1||a=1|set"]))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec!["Changed a from '' to '1'"]))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/commands/edit"))
            .and(body_json(vec!["customer|2||a=1|set", "customer|2||b=2|set"]))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let runner = BatchRunner::new(client(&server), Command::Edit);
        let mut queue = TaskQueue::from_lines(
            Command::Edit,
            "customer|1||a=1|set\ncustomer|2||a=1|set\ncustomer|2||b=2|set\n",
        );
        let summary = runner.run(&mut queue, |_| {}).await;

        assert_eq!(summary.requests, 2);
        assert_eq!(queue.tasks()[0].state, TaskState::Completed);
        assert_eq!(queue.tasks()[1].status(), "Error 500: boom");
        assert_eq!(queue.tasks()[2].status(), "Error for: customer|2");
    }

    #[tokio::test]
    async fn test_record_details_round_trip() {
        let server = MockServer::start().await;
        let details = RecordDetails {
            record_type: "customer".to_string(),
            id: "123".to_string(),
            fields: Vec::new(),
            sublists: Vec::new(),
        };
        Mock::given(method("GET"))
            .and(path("/records/customer/123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&details))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/records/customer/999"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string("Error: Record does not exist: customer 999"),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        assert_eq!(client.record_details("customer", "123").await.unwrap(), details);

        let err = client.record_details("customer", "999").await.unwrap_err();
        assert!(matches!(err, RecordOpsError::RemoteTransport(_)));
        assert!(err.to_string().contains("404"));
    }
}
