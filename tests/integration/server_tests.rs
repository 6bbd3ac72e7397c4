//! The actix app over the seeded store

#[cfg(test)]
mod tests {
    use crate::common::StoreFactory;
    use actix_web::{test, web};
    use recordops::config::Config;
    use recordops::core::commands::RecordDetails;
    use recordops::server::{AppState, HttpServer};

    fn state() -> web::Data<AppState> {
        let (context, _) = StoreFactory::context();
        web::Data::new(AppState::new(Config::default(), context))
    }

    #[actix_web::test]
    async fn test_health_and_version() {
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");

        let req = test::TestRequest::get().uri("/version").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["git_hash"].is_string());
    }

    #[actix_web::test]
    async fn test_lookup_command() {
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::post()
            .uri("/commands/lookup-fields")
            .set_json(vec!["Customer|123||firstname", "Customer|123|nope/0|x"])
            .to_request();
        let results: Vec<String> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(results[0], "John");
        assert_eq!(results[1], "Error: Sublist not found: nope");
    }

    #[actix_web::test]
    async fn test_edit_is_visible_to_later_requests() {
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::post()
            .uri("/commands/edit")
            .set_json(vec!["customer|123||lastname=Doe|set"])
            .to_request();
        let results: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(results, vec!["Changed lastname from 'Smith' to 'Doe'"]);

        let req = test::TestRequest::post()
            .uri("/commands/lookup-fields")
            .set_json(vec!["customer|123||lastname"])
            .to_request();
        let results: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(results, vec!["Doe"]);
    }

    #[actix_web::test]
    async fn test_record_type_query_param() {
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::post()
            .uri("/commands/record-type?record=123")
            .set_json(vec!["Customer"])
            .to_request();
        let results: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(results, vec!["Yes"]);

        let req = test::TestRequest::post()
            .uri("/commands/record-type")
            .set_json(vec!["Customer"])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_request_level_errors_are_plain_text() {
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::post()
            .uri("/commands/publish")
            .set_json(vec!["Customer|123"])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body = test::read_body(resp).await;
        assert_eq!(body, "Error: Invalid argument: Unknown command: publish");

        let req = test::TestRequest::post()
            .uri("/commands/edit")
            .set_json(serde_json::json!({"tasks": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn test_record_details_route() {
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::get()
            .uri("/records/Sales%20Order/500")
            .to_request();
        let details: RecordDetails = test::call_and_read_body_json(&app, req).await;
        assert_eq!(details.record_type, "salesorder");
        assert_eq!(details.sublists[0].lines.len(), 3);

        let req = test::TestRequest::get()
            .uri("/records/customer/999")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn test_record_types_route() {
        let app = test::init_service(HttpServer::create_app(state())).await;

        let req = test::TestRequest::get().uri("/record-types").to_request();
        let names: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert!(names.contains(&"Sales Order".to_string()));
    }
}
