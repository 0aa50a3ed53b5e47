mod common;

use common::{api, branch_json, branch_routes, ok, MockTransport};
use console::shared::api::{ApiError, ApiResponse, ResourceClient};
use console::usecases::u501_resolve_branches::{
    AssociationError, AssociationResolver, BranchSelection,
};
use serde_json::json;

fn resolver(transport: &std::sync::Arc<MockTransport>) -> AssociationResolver {
    AssociationResolver::new(ResourceClient::new(api(transport)))
}

#[tokio::test]
async fn test_siblings_of_anchor_company() {
    let transport = MockTransport::new(|r| branch_routes(r).unwrap_or(ApiResponse::new(404, "")));

    let options = resolver(&transport)
        .resolve_branch_options(1, Some("secret"))
        .await
        .unwrap();

    let ids: Vec<i64> = options.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(
        transport.endpoints(),
        vec!["GET sucursales/1", "GET sucursales/findByEmpresa?empresaId=7"]
    );
}

#[tokio::test]
async fn test_anchor_without_company() {
    let transport = MockTransport::new(|_| {
        let mut orphan = branch_json(4, 0);
        orphan["empresa"] = json!(null);
        ok(orphan)
    });

    let err = resolver(&transport)
        .resolve_branch_options(4, None)
        .await
        .unwrap_err();

    assert_eq!(err, AssociationError::OwnerMissing { anchor_id: 4 });
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_failed_load_leaves_no_options() {
    let ok_transport =
        MockTransport::new(|r| branch_routes(r).unwrap_or(ApiResponse::new(404, "")));
    let mut selection = BranchSelection::new();
    selection
        .load(&resolver(&ok_transport), 1, None)
        .await
        .unwrap();
    selection.select_all();
    assert_eq!(selection.selected_ids(), vec![1, 2]);

    let failing = MockTransport::failing();
    let err = selection
        .load(&resolver(&failing), 1, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AssociationError::Request(ApiError::RequestFailed { status: 500, .. })
    ));
    assert!(selection.options().is_empty());
    assert!(selection.selected_ids().is_empty());
}
