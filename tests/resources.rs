//
//  bitly-cli
//  tests/resources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resource clients driven through an in-memory transport.

use std::error::Error as _;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};

use bitly_cli::api::bitlinks::{
    Bitlinks, CreateBitlinkRequest, ExpandRequest, ShortenRequest, UpdateBitlinkRequest,
};
use bitly_cli::api::bsds::Bsds;
use bitly_cli::api::common::{MetricsQuery, TimeUnit};
use bitly_cli::api::groups::{
    BitlinksQuery, GroupPreferences, GroupUpdate, Groups, GroupsQuery, SortType,
    SortedBitlinksQuery, Toggle,
};
use bitly_cli::api::organizations::Organizations;
use bitly_cli::api::users::{UserUpdate, Users};
use bitly_cli::api::{ApiError, Endpoint, RawResponse, Transport};

/// What the stub answers with.
enum Reply {
    Body(u16, &'static str),
    Fail,
}

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    endpoint: String,
    body: Option<Value>,
}

struct StubTransport {
    reply: Reply,
    calls: Mutex<Vec<Recorded>>,
}

impl StubTransport {
    fn ok(body: &'static str) -> Self {
        Self::with(Reply::Body(200, body))
    }

    fn with(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    fn only_call(&self) -> Recorded {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one request");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, ApiError> {
        self.calls.lock().unwrap().push(Recorded {
            method,
            endpoint: endpoint.to_string(),
            body: body.map(|b| serde_json::from_slice(&b).unwrap()),
        });
        match self.reply {
            Reply::Body(status, body) => Ok(RawResponse::new(status, body)),
            Reply::Fail => Err(ApiError::Transport(Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "stub refused",
            )))),
        }
    }
}

const GROUP: &str = r#"{
    "created": "2019-05-01T12:00:00+0000",
    "guid": "G123",
    "organization_guid": "O456",
    "name": "Marketing",
    "is_active": true,
    "role": "admin",
    "bsds": ["acme.co"],
    "references": {"organization": "https://api-ssl.bitly.com/v4/organizations/O456"}
}"#;

const BITLINK: &str = r#"{
    "created_at": "2024-03-01T10:00:00+0000",
    "id": "bit.ly/3xYz",
    "link": "https://bit.ly/3xYz",
    "long_url": "https://example.com/launch",
    "title": "Launch",
    "archived": false,
    "tags": ["launch", "q3"],
    "deeplinks": [],
    "references": {"group": "https://api-ssl.bitly.com/v4/groups/G123"}
}"#;

const CLICK_METRICS: &str = r#"{
    "unit_reference": "2024-03-01T00:00:00+0000",
    "metrics": [{"value": "US", "clicks": 7}, {"value": "DE", "clicks": 3}],
    "units": 30,
    "unit": "day",
    "facet": "countries"
}"#;

#[tokio::test]
async fn test_group_details_decodes_guid() {
    let stub = StubTransport::ok(GROUP);
    let group = Groups::new(&stub).get("G123").await.unwrap();

    assert_eq!(group.guid, "G123");
    assert_eq!(group.organization_guid, "O456");
    assert!(group.is_active);
    assert_eq!(group.bsds, vec!["acme.co"]);

    let call = stub.only_call();
    assert_eq!(call.method, Method::GET);
    assert_eq!(call.endpoint, "groups/G123");
    assert!(call.body.is_none());
}

#[tokio::test]
async fn test_group_identifier_is_escaped() {
    let stub = StubTransport::ok(GROUP);
    Groups::new(&stub).tags("a/b?c").await.unwrap();
    assert_eq!(stub.only_call().endpoint, "groups/a%2Fb%3Fc/tags");
}

#[tokio::test]
async fn test_dot_segment_identifiers_never_reach_the_transport() {
    let stub = StubTransport::ok(r#"{"groups": []}"#);
    let groups = Groups::new(&stub);

    for id in ["..", ".", ""] {
        let err = groups.get(id).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidIdentifier(_)), "{id:?}: {err:?}");
        let err = groups.tags(id).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidIdentifier(_)), "{id:?}: {err:?}");
    }

    let window = MetricsQuery::new();
    let err = Bitlinks::new(&stub)
        .clicks("bit.ly/..", &window)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidIdentifier(_)));
    let err = Bitlinks::new(&stub)
        .update("https://bit.ly/.", &UpdateBitlinkRequest::new().archived(true))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidIdentifier(_)));

    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn test_list_groups_with_organization_filter() {
    let stub = StubTransport::ok(r#"{"groups": [{"guid": "G1"}, {"guid": "G2"}]}"#);
    let groups = Groups::new(&stub);

    let list = groups.list(&GroupsQuery::new().organization_guid("O456")).await.unwrap();
    assert_eq!(list.groups.len(), 2);

    groups.list(&GroupsQuery::new()).await.unwrap();
    let calls = stub.calls();
    assert_eq!(calls[0].endpoint, "groups?organization_guid=O456");
    assert_eq!(calls[1].endpoint, "groups");
}

#[tokio::test]
async fn test_update_group_sends_only_set_fields() {
    let stub = StubTransport::ok(GROUP);
    Groups::new(&stub)
        .update("G123", &GroupUpdate::new().name("Growth"))
        .await
        .unwrap();

    let call = stub.only_call();
    assert_eq!(call.method, Method::PATCH);
    assert_eq!(call.endpoint, "groups/G123");
    assert_eq!(call.body, Some(json!({"name": "Growth"})));
}

#[tokio::test]
async fn test_group_preferences_round_trip() {
    let stub = StubTransport::ok(r#"{"group_guid": "G123", "domain_preference": "acme.co"}"#);
    let groups = Groups::new(&stub);

    let prefs = groups.preferences("G123").await.unwrap();
    assert_eq!(prefs.domain_preference, "acme.co");

    let update = GroupPreferences {
        group_guid: "G123".to_string(),
        domain_preference: "acme.co".to_string(),
    };
    let updated = groups.update_preferences("G123", &update).await.unwrap();
    assert_eq!(updated, update);

    let calls = stub.calls();
    assert_eq!(calls[0].method, Method::GET);
    assert_eq!(calls[1].method, Method::PATCH);
    assert_eq!(calls[1].endpoint, "groups/G123/preferences");
    assert_eq!(
        calls[1].body,
        Some(json!({"group_guid": "G123", "domain_preference": "acme.co"}))
    );
}

#[tokio::test]
async fn test_group_bitlinks_query_and_pagination() {
    let stub = StubTransport::ok(
        r#"{
            "links": [{"id": "bit.ly/a", "long_url": "https://a.example"}],
            "pagination": {"prev": "", "next": "https://api-ssl.bitly.com/v4/groups/G123/bitlinks?page=3", "size": 1, "page": 2, "total": 9}
        }"#,
    );
    let query = BitlinksQuery::new()
        .size(0)
        .page(2)
        .archived(Toggle::Off)
        .tag("launch")
        .tag("q 3");
    let page = Groups::new(&stub).bitlinks("G123", &query).await.unwrap();

    assert_eq!(page.links[0].id, "bit.ly/a");
    assert_eq!(page.pagination.next_page(), Some(3));
    assert_eq!(
        stub.only_call().endpoint,
        "groups/G123/bitlinks?size=0&page=2&archived=off&tags=launch&tags=q+3"
    );
}

#[tokio::test]
async fn test_sorted_bitlinks_puts_sort_in_path() {
    let stub = StubTransport::ok(
        r#"{"links": [], "sorted_links": [{"id": "bit.ly/a", "clicks": 40}, {"id": "bit.ly/b", "clicks": 2}]}"#,
    );
    let query = SortedBitlinksQuery::new(SortType::Clicks)
        .window(MetricsQuery::new().unit(TimeUnit::Week).units(4));
    let sorted = Groups::new(&stub).sorted_bitlinks("G123", &query).await.unwrap();

    assert_eq!(sorted.sorted_links[0].clicks, 40);
    assert_eq!(stub.only_call().endpoint, "groups/G123/bitlinks/clicks?unit=week&units=4");
}

#[tokio::test]
async fn test_group_metrics_endpoints() {
    let stub = StubTransport::ok(CLICK_METRICS);
    let groups = Groups::new(&stub);

    let countries = groups.countries("G123").await.unwrap();
    assert_eq!(countries.total_clicks(), 10);
    groups.referring_networks("G123").await.unwrap();

    let endpoints: Vec<String> = stub.calls().into_iter().map(|c| c.endpoint).collect();
    assert_eq!(endpoints, ["groups/G123/countries", "groups/G123/referring_networks"]);
}

#[tokio::test]
async fn test_shorten_counts() {
    let stub = StubTransport::ok(
        r#"{"unit_reference": "", "metrics": [{"key": "2024-03-01", "value": 5}, {"key": "2024-03-02", "value": 1}], "units": -1, "unit": "day", "facet": "shorten_counts"}"#,
    );

    let group_counts = Groups::new(&stub).shorten_counts("G123").await.unwrap();
    let org_counts = Organizations::new(&stub).shorten_counts("O456").await.unwrap();
    assert_eq!(group_counts.total(), 6);
    assert_eq!(org_counts, group_counts);

    let endpoints: Vec<String> = stub.calls().into_iter().map(|c| c.endpoint).collect();
    assert_eq!(
        endpoints,
        ["groups/G123/shorten_counts", "organizations/O456/shorten_counts"]
    );
}

#[tokio::test]
async fn test_shorten_posts_body() {
    let stub = StubTransport::with(Reply::Body(201, BITLINK));
    let request = ShortenRequest::new("https://example.com/launch").domain("bit.ly");
    let link = Bitlinks::new(&stub).shorten(&request).await.unwrap();

    assert_eq!(link.id, "bit.ly/3xYz");
    assert_eq!(link.tags, vec!["launch", "q3"]);

    let call = stub.only_call();
    assert_eq!(call.method, Method::POST);
    assert_eq!(call.endpoint, "shorten");
    assert_eq!(
        call.body,
        Some(json!({"long_url": "https://example.com/launch", "domain": "bit.ly"}))
    );
}

#[tokio::test]
async fn test_create_and_expand() {
    let stub = StubTransport::ok(BITLINK);
    let bitlinks = Bitlinks::new(&stub);

    let created = bitlinks
        .create(&CreateBitlinkRequest::new("https://example.com/launch").title("Launch").tag("launch"))
        .await
        .unwrap();
    assert_eq!(created.title.as_deref(), Some("Launch"));

    let expanded = bitlinks.expand(&ExpandRequest::new("bit.ly/3xYz")).await.unwrap();
    assert_eq!(expanded.long_url, "https://example.com/launch");

    let calls = stub.calls();
    assert_eq!(calls[0].endpoint, "bitlinks");
    assert_eq!(calls[0].body.as_ref().unwrap()["tags"], json!(["launch"]));
    assert_eq!(calls[1].endpoint, "expand");
    assert_eq!(calls[1].body, Some(json!({"bitlink_id": "bit.ly/3xYz"})));
}

#[tokio::test]
async fn test_update_bitlink_keeps_domain_and_hash_segments() {
    let stub = StubTransport::ok(BITLINK);
    let request = UpdateBitlinkRequest::new().archived(true).tags(Vec::<String>::new());
    Bitlinks::new(&stub).update("https://bit.ly/3xYz", &request).await.unwrap();

    let call = stub.only_call();
    assert_eq!(call.method, Method::PATCH);
    assert_eq!(call.endpoint, "bitlinks/bit.ly/3xYz");
    assert_eq!(call.body, Some(json!({"archived": true, "tags": []})));
}

#[tokio::test]
async fn test_bitlink_metrics_paths_and_window() {
    let stub = StubTransport::ok(CLICK_METRICS);
    let bitlinks = Bitlinks::new(&stub);
    let window = MetricsQuery::new().unit(TimeUnit::Day).units(-1).size(0);

    bitlinks.clicks_summary("bit.ly/3xYz", &window).await.unwrap();
    bitlinks.clicks("bit.ly/3xYz", &window).await.unwrap();
    bitlinks.countries("bit.ly/3xYz", &window).await.unwrap();
    bitlinks.referrers("bit.ly/3xYz", &window).await.unwrap();
    bitlinks.referrers_by_domains("bit.ly/3xYz", &window).await.unwrap();
    bitlinks.referring_domains("bit.ly/3xYz", &MetricsQuery::new()).await.unwrap();

    let endpoints: Vec<String> = stub.calls().into_iter().map(|c| c.endpoint).collect();
    assert_eq!(
        endpoints,
        [
            "bitlinks/bit.ly/3xYz/clicks/summary?unit=day&units=-1&size=0",
            "bitlinks/bit.ly/3xYz/clicks?unit=day&units=-1&size=0",
            "bitlinks/bit.ly/3xYz/countries?unit=day&units=-1&size=0",
            "bitlinks/bit.ly/3xYz/referrers?unit=day&units=-1&size=0",
            "bitlinks/bit.ly/3xYz/referrers_by_domains?unit=day&units=-1&size=0",
            "bitlinks/bit.ly/3xYz/referring_domains",
        ]
    );
}

#[tokio::test]
async fn test_click_series_decodes() {
    let stub = StubTransport::ok(
        r#"{"link_clicks": [{"clicks": 4, "date": "2024-03-01T00:00:00+0000"}, {"clicks": 6, "date": "2024-03-02T00:00:00+0000"}], "units": 2, "unit": "day", "unit_reference": "2024-03-02T00:00:00+0000"}"#,
    );
    let clicks = Bitlinks::new(&stub).clicks("bit.ly/3xYz", &MetricsQuery::new()).await.unwrap();
    assert_eq!(clicks.total_clicks(), 10);
    assert_eq!(clicks.link_clicks.len(), 2);
}

#[tokio::test]
async fn test_branded_domains() {
    let stub = StubTransport::ok(r#"{"bsds": ["acme.co", "go.acme.co"]}"#);
    let domains = Bsds::new(&stub).list().await.unwrap();
    assert_eq!(domains.bsds, vec!["acme.co", "go.acme.co"]);
    assert_eq!(stub.only_call().endpoint, "bsds");
}

#[tokio::test]
async fn test_organizations() {
    let stub = StubTransport::ok(r#"{"organizations": [{"guid": "O456", "name": "Acme", "tier": "free"}]}"#);
    let list = Organizations::new(&stub).list().await.unwrap();
    assert_eq!(list.organizations[0].tier, "free");
    assert_eq!(stub.only_call().endpoint, "organizations");
}

#[tokio::test]
async fn test_current_user_and_update() {
    let stub = StubTransport::ok(
        r#"{"login": "ada", "name": "Ada", "is_active": true, "default_group_guid": "G123", "emails": [{"email": "ada@example.com", "is_primary": true, "is_verified": true}]}"#,
    );
    let users = Users::new(&stub);

    let user = users.current().await.unwrap();
    assert_eq!(user.default_group_guid, "G123");
    assert_eq!(user.primary_email().unwrap().email, "ada@example.com");

    users.update(&UserUpdate::new().name("Ada L.")).await.unwrap();
    let calls = stub.calls();
    assert_eq!((calls[0].method.clone(), calls[0].endpoint.as_str()), (Method::GET, "user"));
    assert_eq!((calls[1].method.clone(), calls[1].endpoint.as_str()), (Method::PATCH, "user"));
    assert_eq!(calls[1].body, Some(json!({"name": "Ada L."})));
}

/// Every public resource operation, so failure modes can be checked across
/// the whole surface.
#[derive(Debug, Clone, Copy)]
enum Op {
    Expand,
    Create,
    Shorten,
    UpdateBitlink,
    ClicksSummary,
    Clicks,
    Countries,
    Referrers,
    ReferrersByDomains,
    ReferringDomains,
    ListBsds,
    ListGroups,
    GetGroup,
    UpdateGroup,
    GroupPreferences,
    UpdateGroupPreferences,
    GroupBitlinks,
    GroupTags,
    GroupCountries,
    GroupReferringNetworks,
    GroupShortenCounts,
    SortedBitlinks,
    ListOrganizations,
    GetOrganization,
    OrganizationShortenCounts,
    CurrentUser,
    UpdateUser,
}

impl Op {
    const ALL: [Op; 27] = [
        Op::Expand,
        Op::Create,
        Op::Shorten,
        Op::UpdateBitlink,
        Op::ClicksSummary,
        Op::Clicks,
        Op::Countries,
        Op::Referrers,
        Op::ReferrersByDomains,
        Op::ReferringDomains,
        Op::ListBsds,
        Op::ListGroups,
        Op::GetGroup,
        Op::UpdateGroup,
        Op::GroupPreferences,
        Op::UpdateGroupPreferences,
        Op::GroupBitlinks,
        Op::GroupTags,
        Op::GroupCountries,
        Op::GroupReferringNetworks,
        Op::GroupShortenCounts,
        Op::SortedBitlinks,
        Op::ListOrganizations,
        Op::GetOrganization,
        Op::OrganizationShortenCounts,
        Op::CurrentUser,
        Op::UpdateUser,
    ];

    async fn call(self, transport: &dyn Transport) -> Result<(), ApiError> {
        let link = "bit.ly/3xYz";
        let window = MetricsQuery::new();
        let bitlinks = Bitlinks::new(transport);
        let groups = Groups::new(transport);
        let organizations = Organizations::new(transport);
        let users = Users::new(transport);

        match self {
            Op::Expand => bitlinks.expand(&ExpandRequest::new(link)).await.map(drop),
            Op::Create => bitlinks
                .create(&CreateBitlinkRequest::new("https://example.com"))
                .await
                .map(drop),
            Op::Shorten => bitlinks
                .shorten(&ShortenRequest::new("https://example.com"))
                .await
                .map(drop),
            Op::UpdateBitlink => bitlinks
                .update(link, &UpdateBitlinkRequest::new().title("t"))
                .await
                .map(drop),
            Op::ClicksSummary => bitlinks.clicks_summary(link, &window).await.map(drop),
            Op::Clicks => bitlinks.clicks(link, &window).await.map(drop),
            Op::Countries => bitlinks.countries(link, &window).await.map(drop),
            Op::Referrers => bitlinks.referrers(link, &window).await.map(drop),
            Op::ReferrersByDomains => bitlinks.referrers_by_domains(link, &window).await.map(drop),
            Op::ReferringDomains => bitlinks.referring_domains(link, &window).await.map(drop),
            Op::ListBsds => Bsds::new(transport).list().await.map(drop),
            Op::ListGroups => groups.list(&GroupsQuery::new()).await.map(drop),
            Op::GetGroup => groups.get("G123").await.map(drop),
            Op::UpdateGroup => groups
                .update("G123", &GroupUpdate::new().name("n"))
                .await
                .map(drop),
            Op::GroupPreferences => groups.preferences("G123").await.map(drop),
            Op::UpdateGroupPreferences => groups
                .update_preferences("G123", &GroupPreferences::default())
                .await
                .map(drop),
            Op::GroupBitlinks => groups.bitlinks("G123", &BitlinksQuery::new()).await.map(drop),
            Op::GroupTags => groups.tags("G123").await.map(drop),
            Op::GroupCountries => groups.countries("G123").await.map(drop),
            Op::GroupReferringNetworks => groups.referring_networks("G123").await.map(drop),
            Op::GroupShortenCounts => groups.shorten_counts("G123").await.map(drop),
            Op::SortedBitlinks => groups
                .sorted_bitlinks("G123", &SortedBitlinksQuery::default())
                .await
                .map(drop),
            Op::ListOrganizations => organizations.list().await.map(drop),
            Op::GetOrganization => organizations.get("O456").await.map(drop),
            Op::OrganizationShortenCounts => organizations.shorten_counts("O456").await.map(drop),
            Op::CurrentUser => users.current().await.map(drop),
            Op::UpdateUser => users.update(&UserUpdate::new().name("n")).await.map(drop),
        }
    }
}

#[tokio::test]
async fn test_every_operation_succeeds_on_empty_object() {
    for op in Op::ALL {
        let stub = StubTransport::ok("{}");
        assert!(op.call(&stub).await.is_ok(), "{:?} failed on an empty object", op);
        assert_eq!(stub.calls().len(), 1, "{:?} did not make exactly one request", op);
    }
}

#[tokio::test]
async fn test_every_operation_wraps_transport_errors() {
    for op in Op::ALL {
        let stub = StubTransport::with(Reply::Fail);
        let err = op.call(&stub).await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)), "{:?} returned {:?}", op, err);
        let cause = err
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .unwrap_or_else(|| panic!("{:?} lost the transport cause", op));
        assert_eq!(cause.kind(), io::ErrorKind::ConnectionRefused);
    }
}

#[tokio::test]
async fn test_every_operation_reports_malformed_json() {
    for op in Op::ALL {
        let stub = StubTransport::ok("{\"guid\": \"G123\", ");
        let err = op.call(&stub).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "{:?} returned {:?}", op, err);
    }
}

#[tokio::test]
async fn test_every_operation_classifies_error_status() {
    for op in Op::ALL {
        let stub = StubTransport::with(Reply::Body(
            404,
            r#"{"message": "NOT_FOUND", "resource": "groups", "description": "What you are looking for cannot be found."}"#,
        ));
        let err = op.call(&stub).await.unwrap_err();

        assert!(err.is_not_found(), "{:?} returned {:?}", op, err);
        match err {
            ApiError::Remote { status, envelope } => {
                assert_eq!(status, 404);
                assert_eq!(envelope.message, "NOT_FOUND");
                assert_eq!(envelope.resource.as_deref(), Some("groups"));
            }
            other => panic!("{:?} returned {:?}", op, other),
        }
    }
}

#[tokio::test]
async fn test_error_status_never_decodes_as_success() {
    // A 403 body that happens to fit the success shape still fails.
    let stub = StubTransport::with(Reply::Body(403, GROUP));
    let err = Groups::new(&stub).get("G123").await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.status(), Some(403));
}
