use rpcgate::reqwest::{Method, StatusCode};
use rpcgate::{Action, Dispatcher, Error, Operation, ViewRoute};
use rpcgate_test::MockFetch;
use serde_json::{json, Value};

const VISITS: &str = r"patients/(?P<patient_id>[^/.]+)/visits/(?P<pk>[^/.]+)/";

fn dispatcher(mock: &MockFetch) -> Dispatcher<MockFetch> {
    Dispatcher::with_base_url(mock.clone(), "/api/")
}

#[tokio::test]
async fn viewset_retrieve_sends_get() {
    let mock = MockFetch::respond_json(StatusCode::OK, json!({ "id": 11 }));
    let view = ViewRoute::viewset("PatientVisitViewSet", VISITS);

    let visit: Value = view
        .query(&dispatcher(&mock), Action::Retrieve, [("patient_id", "3"), ("pk", "11")])
        .await
        .unwrap();

    assert_eq!(visit, json!({ "id": 11 }));
    let req = mock.single_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.url, "/api/patients/3/visits/11/");
    assert!(req.body.is_none());
}

#[tokio::test]
async fn viewset_partial_update_takes_params_from_payload() {
    let mock = MockFetch::respond_json(StatusCode::OK, json!({ "id": 11 }));
    let view = ViewRoute::viewset("PatientVisitViewSet", VISITS);
    let payload = json!({ "patient_id": 3, "pk": 11, "notes": "follow-up" });

    let _: Value = view
        .mutate(&dispatcher(&mock), Action::PartialUpdate, &payload)
        .await
        .unwrap();

    let req = mock.single_request();
    assert_eq!(req.method, Method::PATCH);
    assert_eq!(req.url, "/api/patients/3/visits/11/");
    let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, payload);
}

#[tokio::test]
async fn viewset_create_posts_payload() {
    let mock = MockFetch::respond_json(StatusCode::CREATED, json!({ "id": 1 }));
    let view = ViewRoute::viewset("PatientViewSet", "patients/");

    let created: Value = view
        .mutate(&dispatcher(&mock), Action::Create, &json!({ "name": "Ada" }))
        .await
        .unwrap();

    assert_eq!(created, json!({ "id": 1 }));
    let req = mock.single_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.url, "/api/patients/");
}

#[tokio::test]
async fn unsupported_operation_is_rejected_before_fetch() {
    let mock = MockFetch::respond_json(StatusCode::OK, json!({}));
    let view = ViewRoute::new("PatientViewSet", "patients/", [Action::List]);

    let err = view
        .query::<_, Value, _, _, &str, &str>(&dispatcher(&mock), Action::Destroy, [])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)), "{err:?}");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn api_view_sends_with_declared_verbs() {
    let mock = MockFetch::respond_json(StatusCode::OK, json!({ "ok": true }));
    let view = ViewRoute::api_view("VisitSummaryView", r"patients/(?P<patient_id>\d+)/summary/", &["get", "post", "options"])
        .unwrap();
    assert_eq!(view.operations(), [Operation::Verb(Method::GET), Operation::Verb(Method::POST)]);

    let _: Value = view
        .call(&dispatcher(&mock), Method::POST, [("patient_id", "3")], Some(&json!({ "days": 7 })))
        .await
        .unwrap();

    let req = mock.single_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.url, "/api/patients/3/summary/");
    assert_eq!(req.body.as_deref(), Some(r#"{"days":7}"#));
}

#[tokio::test]
async fn regex_anchors_reach_the_url() {
    let mock = MockFetch::respond_json(StatusCode::OK, json!([]));
    let view = ViewRoute::viewset("PatientViewSet", r"^patients/$");

    let _: Value = view
        .query::<_, _, _, _, &str, &str>(&dispatcher(&mock), Action::List, [])
        .await
        .unwrap();

    assert_eq!(mock.single_request().url, "/api/^patients/$");
}

#[tokio::test]
async fn view_request_error_carries_status() {
    let mock = MockFetch::respond(StatusCode::NOT_FOUND, "missing");
    let view = ViewRoute::viewset("PatientVisitViewSet", VISITS);

    let err = view
        .query::<_, Value, _, _, _, _>(&dispatcher(&mock), Action::Retrieve, [("patient_id", "3"), ("pk", "404")])
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(mock.body_reads(), 0);
}
