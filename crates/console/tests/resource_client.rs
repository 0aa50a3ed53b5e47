mod common;

use common::{api, company_json, ok, MockTransport};
use console::shared::api::{ApiError, ApiResponse, Method, RequestBody, ResourceClient};
use console::shared::state::{RefreshHook, ResourceList};
use contracts::domain::a001_company::aggregate::{Company, CompanyCreate};
use contracts::domain::a002_branch::aggregate::Branch;
use serde_json::json;

fn companies(transport: &std::sync::Arc<MockTransport>) -> ResourceClient<Company> {
    ResourceClient::new(api(transport))
}

#[tokio::test]
async fn test_auth_variants_send_bearer() {
    let transport = MockTransport::new(|r| match r.method {
        Method::Get if r.path == "empresas" => ok(json!([company_json(1)])),
        Method::Get => ok(company_json(1)),
        _ => ApiResponse::new(200, ""),
    });
    let client = companies(&transport);

    client.get_auth(1, "t0k3n").await.unwrap();
    client.get_all_auth("t0k3n").await.unwrap();
    client.delete_auth(1, "t0k3n").await.unwrap();

    assert!(transport
        .requests()
        .iter()
        .all(|r| r.bearer.as_deref() == Some("t0k3n")));
    assert_eq!(
        transport.endpoints(),
        vec!["GET empresas/1", "GET empresas", "DELETE empresas/1"]
    );
}

#[tokio::test]
async fn test_plain_variants_send_no_header() {
    let transport = MockTransport::new(|_| ok(company_json(4)));
    let client = companies(&transport);

    let company = client.get(4).await.unwrap();

    assert_eq!(company.razon_social, "La Esquina S.A.");
    assert_eq!(transport.requests()[0].bearer, None);
}

#[tokio::test]
async fn test_create_posts_camel_case_body() {
    let transport = MockTransport::new(|_| ok(company_json(9)));
    let client = companies(&transport);

    let form = CompanyCreate {
        nombre: "La Esquina".into(),
        razon_social: "La Esquina S.A.".into(),
        cuil: "20-12345678-9".into(),
    };
    let created = client.create_auth(&form, "t").await.unwrap();

    assert_eq!(created.id, 9);
    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(
        request.body,
        RequestBody::Json(json!({
            "nombre": "La Esquina",
            "razonSocial": "La Esquina S.A.",
            "cuil": "20-12345678-9"
        }))
    );
}

#[tokio::test]
async fn test_error_status_carries_endpoint() {
    let transport = MockTransport::new(|_| ApiResponse::new(404, "not found"));

    let err = companies(&transport).get(77).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::RequestFailed {
            status: 404,
            endpoint: "GET empresas/77".into()
        }
    );
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_no_content_where_record_expected() {
    let transport = MockTransport::new(|_| ApiResponse::new(204, ""));

    let err = companies(&transport).get(1).await.unwrap_err();
    assert!(matches!(err, ApiError::EmptyResponse { .. }));

    // для удаления пустой ответ нормален
    companies(&transport).delete(1).await.unwrap();
}

#[tokio::test]
async fn test_find_by_encodes_query() {
    let transport = MockTransport::new(|_| ok(json!([])));

    let found = ResourceClient::<Branch>::new(api(&transport))
        .find_by("findByEmpresa", &[("empresaId", "7".to_string())], None)
        .await
        .unwrap();

    assert!(found.is_empty());
    assert_eq!(
        transport.requests()[0].query,
        vec![("empresaId".to_string(), "7".to_string())]
    );
}

#[tokio::test]
async fn test_list_refresh_hides_deleted() {
    let transport = MockTransport::new(|_| {
        let mut removed = company_json(2);
        removed["eliminado"] = json!(true);
        ok(json!([company_json(1), removed]))
    });
    let session = common::session();
    let list = ResourceList::new(companies(&transport), session);

    assert!(list.refreshed_at().is_none());
    list.refresh().await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list.visible().len(), 1);
    assert!(list.refreshed_at().is_some());
    assert_eq!(transport.requests()[0].bearer.as_deref(), Some("secret"));
}
