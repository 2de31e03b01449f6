//! Typed Rust client for the Azure Resource Manager REST API.
//!
//! Covers the subset needed to stand up a single VM: resource groups,
//! virtual networks, subnets, public IPs, network interfaces, virtual
//! machines and subscription discovery. Create calls wait for the
//! long-running operation to reach a terminal state before returning.

mod credential;
mod subscriptions;
mod types;

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use credential::{AUTHORITY_HOST, Credential};
pub use subscriptions::SubscriptionClient;
pub use reqwest::StatusCode;
pub use types::*;

pub const MANAGEMENT_URL: &str = "https://management.azure.com";

const RESOURCES_API_VERSION: &str = "2021-04-01";
const NETWORK_API_VERSION: &str = "2023-09-01";
const COMPUTE_API_VERSION: &str = "2023-09-01";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("azure api request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("azure api {endpoint} returned {status}: {}", detail(.code, .message))]
    Api {
        endpoint: &'static str,
        status: StatusCode,
        code: Option<String>,
        message: String,
    },

    #[error("azure operation {endpoint} ended {status}: {}", detail(.code, .message))]
    Operation {
        endpoint: &'static str,
        status: String,
        code: Option<String>,
        message: String,
    },

    #[error("azure token request returned {status}: {body}")]
    Token { status: StatusCode, body: String },
}

fn detail(code: &Option<String>, message: &str) -> String {
    match code {
        Some(code) => format!("({code}) {message}"),
        None => message.to_string(),
    }
}

impl Error {
    /// ARM error code (e.g. `ResourceGroupNotFound`), if the service sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } | Self::Operation { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::Token { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
            Self::Operation { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Where to observe completion of a long-running operation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Poll {
    AsyncOperation(String),
    Location(String),
}

/// Authenticated request plumbing shared by every ARM client.
#[derive(Clone)]
struct Transport {
    token: String,
    http: reqwest::Client,
}

impl Transport {
    fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Every request carries the bearer token and a fresh client request id.
    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("Authorization", self.auth())
            .header("x-ms-client-request-id", uuid::Uuid::new_v4().to_string())
    }

    async fn get_json<R: DeserializeOwned>(
        &self,
        url: &str,
        api_version: &str,
        endpoint: &'static str,
    ) -> Result<R> {
        let resp = self
            .request(Method::GET, url)
            .query(&[("api-version", api_version)])
            .send()
            .await?;

        check(resp, endpoint).await?.json().await.map_err(Error::from)
    }

    /// GET every page of a list, following `nextLink`.
    async fn list_all<T: DeserializeOwned>(
        &self,
        url: &str,
        api_version: &str,
        endpoint: &'static str,
    ) -> Result<Vec<T>> {
        let mut page: Page<T> = self.get_json(url, api_version, endpoint).await?;
        let mut items = std::mem::take(&mut page.value);

        while let Some(next) = page.next_link.take() {
            // nextLink already carries api-version and the skip token.
            let resp = self.request(Method::GET, &next).send().await?;
            page = check(resp, endpoint).await?.json().await?;
            items.append(&mut page.value);
        }

        Ok(items)
    }
}

async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let (code, message) = parse_error_body(&body);
        return Err(Error::Api {
            endpoint,
            status,
            code,
            message,
        });
    }
    Ok(resp)
}

/// Client for ARM resources within one subscription.
#[derive(Clone)]
pub struct ArmClient {
    transport: Transport,
    subscription_id: String,
    base_url: String,
    poll_interval: Duration,
}

impl ArmClient {
    pub fn new(token: impl Into<String>, subscription_id: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(token),
            subscription_id: subscription_id.into(),
            base_url: MANAGEMENT_URL.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Delay between polls when the service sends no `Retry-After`.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn url(&self, path: &str) -> String {
        format!("{}/subscriptions/{}{path}", self.base_url, self.subscription_id)
    }

    fn provider_url(&self, resource_group: &str, provider: &str, path: &str) -> String {
        self.url(&format!(
            "/resourceGroups/{resource_group}/providers/{provider}{path}"
        ))
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.transport.request(method, url)
    }

    /// PUT a resource and block until its long-running operation is terminal.
    async fn put_and_wait<B: Serialize, R: DeserializeOwned>(
        &self,
        url: String,
        api_version: &str,
        body: &B,
        endpoint: &'static str,
    ) -> Result<R> {
        let resp = self
            .request(Method::PUT, &url)
            .query(&[("api-version", api_version)])
            .json(body)
            .send()
            .await?;

        let resp = check(resp, endpoint).await?;

        match poll_target(resp.status(), resp.headers()) {
            None => resp.json().await.map_err(Error::from),
            Some(poll) => {
                let delay = retry_after(resp.headers());
                self.wait_for_operation(&poll, delay, endpoint).await?;
                self.transport.get_json(&url, api_version, endpoint).await
            }
        }
    }

    async fn wait_for_operation(
        &self,
        poll: &Poll,
        mut delay: Option<Duration>,
        endpoint: &'static str,
    ) -> Result<()> {
        loop {
            tokio::time::sleep(delay.unwrap_or(self.poll_interval)).await;

            match poll {
                Poll::AsyncOperation(url) => {
                    let resp = self.request(Method::GET, url).send().await?;
                    let resp = check(resp, endpoint).await?;
                    delay = retry_after(resp.headers());

                    let op: AsyncOperation = resp.json().await?;
                    debug!(endpoint, status = %op.status, "azure: polled operation");

                    match op.status.as_str() {
                        "Succeeded" => return Ok(()),
                        "Failed" | "Canceled" => {
                            let err = op.error.unwrap_or_default();
                            return Err(Error::Operation {
                                endpoint,
                                status: op.status,
                                code: Some(err.code).filter(|c| !c.is_empty()),
                                message: err.message,
                            });
                        }
                        _ => {}
                    }
                }
                Poll::Location(url) => {
                    let resp = self.request(Method::GET, url).send().await?;
                    let resp = check(resp, endpoint).await?;
                    debug!(endpoint, status = %resp.status(), "azure: polled location");

                    if resp.status() != StatusCode::ACCEPTED {
                        return Ok(());
                    }
                    delay = retry_after(resp.headers());
                }
            }
        }
    }

    // ── Resource groups ──────────────────────────────────────────────

    /// Resource groups are created synchronously.
    pub async fn create_or_update_resource_group(
        &self,
        name: &str,
        group: &ResourceGroup,
    ) -> Result<ResourceGroup> {
        let resp = self
            .request(Method::PUT, &self.url(&format!("/resourcegroups/{name}")))
            .query(&[("api-version", RESOURCES_API_VERSION)])
            .json(group)
            .send()
            .await?;

        check(resp, "create resource group")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    // ── Network ──────────────────────────────────────────────────────

    pub async fn create_or_update_virtual_network(
        &self,
        resource_group: &str,
        name: &str,
        vnet: &VirtualNetwork,
    ) -> Result<VirtualNetwork> {
        let url = self.provider_url(
            resource_group,
            "Microsoft.Network",
            &format!("/virtualNetworks/{name}"),
        );
        self.put_and_wait(url, NETWORK_API_VERSION, vnet, "create virtual network")
            .await
    }

    pub async fn create_or_update_subnet(
        &self,
        resource_group: &str,
        vnet: &str,
        name: &str,
        subnet: &Subnet,
    ) -> Result<Subnet> {
        let url = self.provider_url(
            resource_group,
            "Microsoft.Network",
            &format!("/virtualNetworks/{vnet}/subnets/{name}"),
        );
        self.put_and_wait(url, NETWORK_API_VERSION, subnet, "create subnet")
            .await
    }

    pub async fn create_or_update_public_ip_address(
        &self,
        resource_group: &str,
        name: &str,
        ip: &PublicIpAddress,
    ) -> Result<PublicIpAddress> {
        let url = self.provider_url(
            resource_group,
            "Microsoft.Network",
            &format!("/publicIPAddresses/{name}"),
        );
        self.put_and_wait(url, NETWORK_API_VERSION, ip, "create public ip address")
            .await
    }

    pub async fn create_or_update_network_interface(
        &self,
        resource_group: &str,
        name: &str,
        nic: &NetworkInterface,
    ) -> Result<NetworkInterface> {
        let url = self.provider_url(
            resource_group,
            "Microsoft.Network",
            &format!("/networkInterfaces/{name}"),
        );
        self.put_and_wait(url, NETWORK_API_VERSION, nic, "create network interface")
            .await
    }

    pub async fn list_network_interfaces(
        &self,
        resource_group: &str,
    ) -> Result<Vec<NetworkInterface>> {
        let url = self.provider_url(resource_group, "Microsoft.Network", "/networkInterfaces");
        self.transport.list_all(&url, NETWORK_API_VERSION, "list network interfaces")
            .await
    }

    // ── Compute ──────────────────────────────────────────────────────

    pub async fn create_or_update_virtual_machine(
        &self,
        resource_group: &str,
        name: &str,
        vm: &VirtualMachine,
    ) -> Result<VirtualMachine> {
        let url = self.provider_url(
            resource_group,
            "Microsoft.Compute",
            &format!("/virtualMachines/{name}"),
        );
        self.put_and_wait(url, COMPUTE_API_VERSION, vm, "create virtual machine")
            .await
    }

    pub async fn list_virtual_machines(&self, resource_group: &str) -> Result<Vec<VirtualMachine>> {
        let url = self.provider_url(resource_group, "Microsoft.Compute", "/virtualMachines");
        self.transport.list_all(&url, COMPUTE_API_VERSION, "list virtual machines")
            .await
    }
}

/// Split an ARM error body into `(code, message)`, falling back to the raw body.
fn parse_error_body(body: &str) -> (Option<String>, String) {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(resp) => (
            Some(resp.error.code).filter(|c| !c.is_empty()),
            resp.error.message,
        ),
        Err(_) => (None, body.to_string()),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

fn poll_target(status: StatusCode, headers: &HeaderMap) -> Option<Poll> {
    if let Some(url) = header_str(headers, "azure-asyncoperation") {
        return Some(Poll::AsyncOperation(url.to_string()));
    }
    if status == StatusCode::ACCEPTED {
        return header_str(headers, "location").map(|url| Poll::Location(url.to_string()));
    }
    None
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    header_str(headers, "retry-after")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::routing::{get, put};
    use axum::{Json, Router};
    use reqwest::header::HeaderValue;
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    const VNET: &str =
        "/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/vm1-vnet";
    const NICS: &str =
        "/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.Network/networkInterfaces";

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_str(v).unwrap());
        }
        map
    }

    #[test]
    fn parses_arm_error_body() {
        let body = r#"{"error":{"code":"ResourceGroupNotFound","message":"Resource group 'rg1' could not be found."}}"#;
        let (code, message) = parse_error_body(body);
        assert_eq!(code.as_deref(), Some("ResourceGroupNotFound"));
        assert_eq!(message, "Resource group 'rg1' could not be found.");
    }

    #[test]
    fn non_json_error_body_is_kept_verbatim() {
        let (code, message) = parse_error_body("<html>bad gateway</html>");
        assert_eq!(code, None);
        assert_eq!(message, "<html>bad gateway</html>");
    }

    #[test]
    fn async_operation_header_wins_over_location() {
        let h = headers(&[
            ("azure-asyncoperation", "https://op/1"),
            ("location", "https://loc/1"),
        ]);
        assert_eq!(
            poll_target(StatusCode::CREATED, &h),
            Some(Poll::AsyncOperation("https://op/1".into()))
        );
    }

    #[test]
    fn location_is_only_polled_on_accepted() {
        let h = headers(&[("location", "https://loc/1")]);
        assert_eq!(
            poll_target(StatusCode::ACCEPTED, &h),
            Some(Poll::Location("https://loc/1".into()))
        );
        assert_eq!(poll_target(StatusCode::OK, &h), None);
    }

    #[test]
    fn retry_after_in_seconds() {
        assert_eq!(
            retry_after(&headers(&[("retry-after", "10")])),
            Some(Duration::from_secs(10))
        );
        assert_eq!(retry_after(&headers(&[("retry-after", "soon")])), None);
        assert_eq!(retry_after(&HeaderMap::new()), None);
    }

    #[test]
    fn provider_urls_are_scoped_to_subscription_and_group() {
        let client = ArmClient::new("t", "sub-1").with_base_url("https://arm.example/");
        assert_eq!(
            client.provider_url("rg1", "Microsoft.Network", "/virtualNetworks/vm1-vnet/subnets/default"),
            "https://arm.example/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/vm1-vnet/subnets/default"
        );
    }

    #[test]
    fn error_display_includes_code() {
        let err = Error::Api {
            endpoint: "create virtual machine",
            status: StatusCode::CONFLICT,
            code: Some("Conflict".into()),
            message: "already exists".into(),
        };
        assert_eq!(
            err.to_string(),
            "azure api create virtual machine returned 409 Conflict: (Conflict) already exists"
        );
        assert_eq!(err.code(), Some("Conflict"));
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn network_interface_payload_uses_arm_field_names() {
        let nic = NetworkInterface {
            location: Some("eastus".into()),
            properties: Some(NetworkInterfaceProperties {
                ip_configurations: vec![IpConfiguration {
                    name: "vm1-ip".into(),
                    properties: Some(IpConfigurationProperties {
                        subnet: Some(SubResource { id: "/sub/id".into() }),
                        public_ip_address: Some(SubResource { id: "/ip/id".into() }),
                        private_ip_address: None,
                    }),
                }],
                provisioning_state: None,
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(&nic).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "location": "eastus",
                "properties": {
                    "ipConfigurations": [{
                        "name": "vm1-ip",
                        "properties": {
                            "subnet": { "id": "/sub/id" },
                            "publicIPAddress": { "id": "/ip/id" }
                        }
                    }]
                }
            })
        );
    }

    #[test]
    fn virtual_machine_response_exposes_provisioning_state() {
        let vm: VirtualMachine = serde_json::from_value(serde_json::json!({
            "id": "/subscriptions/s/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1",
            "name": "vm1",
            "location": "eastus",
            "properties": {
                "hardwareProfile": { "vmSize": "Standard_D4s_v3" },
                "osProfile": { "computerName": "vm1", "adminUsername": "azureadmin" },
                "provisioningState": "Succeeded"
            }
        }))
        .unwrap();

        assert_eq!(vm.name(), Some("vm1"));
        assert_eq!(vm.location(), Some("eastus"));
        assert_eq!(vm.provisioning_state(), Some("Succeeded"));
    }

    // ── Against a local ARM stand-in ─────────────────────────────────

    /// Bound before routing so handlers can hand out absolute poll URLs.
    async fn listener() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        (listener, base)
    }

    fn serve(listener: TcpListener, app: Router) {
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    }

    fn client(base: &str) -> ArmClient {
        ArmClient::new("t", "sub-1")
            .with_base_url(base)
            .with_poll_interval(Duration::from_millis(1))
    }

    fn vnet_body(state: &str) -> Value {
        json!({
            "id": VNET,
            "name": "vm1-vnet",
            "location": "eastus",
            "properties": { "provisioningState": state }
        })
    }

    async fn create_vnet(base: &str) -> Result<VirtualNetwork> {
        client(base)
            .create_or_update_virtual_network("rg1", "vm1-vnet", &VirtualNetwork::default())
            .await
    }

    /// A vnet PUT whose async operation always reports `operation`.
    async fn vnet_with_operation(operation: Value) -> Result<VirtualNetwork> {
        let (listener, base) = listener().await;
        let op_url = format!("{base}/operations/1");
        let app = Router::new()
            .route(
                VNET,
                put(move || async move {
                    (
                        StatusCode::CREATED,
                        [("azure-asyncoperation", op_url)],
                        Json(vnet_body("Updating")),
                    )
                }),
            )
            .route("/operations/1", get(move || async move { Json(operation) }));
        serve(listener, app);

        create_vnet(&base).await
    }

    #[tokio::test]
    async fn async_operation_is_polled_until_succeeded_then_reread() {
        let (listener, base) = listener().await;
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();
        let op_url = format!("{base}/operations/1");

        let app = Router::new()
            .route(
                VNET,
                put(move || async move {
                    (
                        StatusCode::CREATED,
                        [("azure-asyncoperation", op_url)],
                        Json(vnet_body("Updating")),
                    )
                })
                .get(|| async { Json(vnet_body("Succeeded")) }),
            )
            .route(
                "/operations/1",
                get(move || async move {
                    let status = match counter.fetch_add(1, Ordering::SeqCst) {
                        0 => "InProgress",
                        _ => "Succeeded",
                    };
                    Json(json!({ "status": status }))
                }),
            );
        serve(listener, app);

        let vnet = create_vnet(&base).await.unwrap();

        assert_eq!(polls.load(Ordering::SeqCst), 2);
        assert_eq!(vnet.name(), Some("vm1-vnet"));
        assert_eq!(vnet.provisioning_state(), Some("Succeeded"));
    }

    #[tokio::test]
    async fn failed_operation_keeps_arm_code() {
        let err = vnet_with_operation(json!({
            "status": "Failed",
            "error": { "code": "NicReservedForAnotherVm", "message": "reserved" }
        }))
        .await
        .unwrap_err();

        match &err {
            Error::Operation {
                endpoint,
                status,
                message,
                ..
            } => {
                assert_eq!(*endpoint, "create virtual network");
                assert_eq!(status, "Failed");
                assert_eq!(message, "reserved");
            }
            other => panic!("expected operation error, got {other:?}"),
        }
        assert_eq!(err.code(), Some("NicReservedForAnotherVm"));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn canceled_operation_is_an_error() {
        let err = vnet_with_operation(json!({ "status": "Canceled" }))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Operation { ref status, code: None, .. } if status == "Canceled"));
    }

    #[tokio::test]
    async fn location_is_polled_while_accepted() {
        let (listener, base) = listener().await;
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();
        let location = format!("{base}/locations/1");

        let app = Router::new()
            .route(
                VNET,
                put(move || async move { (StatusCode::ACCEPTED, [("location", location)]) })
                    .get(|| async { Json(vnet_body("Succeeded")) }),
            )
            .route(
                "/locations/1",
                get(move || async move {
                    match counter.fetch_add(1, Ordering::SeqCst) {
                        0 | 1 => StatusCode::ACCEPTED,
                        _ => StatusCode::OK,
                    }
                }),
            );
        serve(listener, app);

        let vnet = create_vnet(&base).await.unwrap();

        assert_eq!(polls.load(Ordering::SeqCst), 3);
        assert_eq!(vnet.provisioning_state(), Some("Succeeded"));
    }

    #[tokio::test]
    async fn rejected_put_surfaces_arm_error() {
        let (listener, base) = listener().await;
        let app = Router::new().route(
            VNET,
            put(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "error": {
                            "code": "ResourceGroupNotFound",
                            "message": "Resource group 'rg1' could not be found."
                        }
                    })),
                )
            }),
        );
        serve(listener, app);

        let err = create_vnet(&base).await.unwrap_err();

        assert_eq!(err.code(), Some("ResourceGroupNotFound"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn list_follows_next_link() {
        let (listener, base) = listener().await;
        let next = format!("{base}/pages/2");

        let app = Router::new()
            .route(
                NICS,
                get(move || async move {
                    Json(json!({ "value": [{ "name": "web-nic" }], "nextLink": next }))
                }),
            )
            .route(
                "/pages/2",
                get(|| async { Json(json!({ "value": [{ "name": "vm1-nic" }] })) }),
            );
        serve(listener, app);

        let nics = client(&base).list_network_interfaces("rg1").await.unwrap();

        let names: Vec<_> = nics.iter().filter_map(|n| n.name()).collect();
        assert_eq!(names, ["web-nic", "vm1-nic"]);
    }

    #[tokio::test]
    async fn subscription_pages_carry_request_ids() {
        let (listener, base) = listener().await;
        let next = format!("{base}/subscriptions-next");
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let (first, second) = (seen.clone(), seen.clone());

        fn request_id(headers: &HeaderMap) -> String {
            headers
                .get("x-ms-client-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        }

        let app = Router::new()
            .route(
                "/subscriptions",
                get(move |headers: HeaderMap| async move {
                    first.lock().unwrap().push(request_id(&headers));
                    Json(json!({ "value": [{ "subscriptionId": "sub-a" }], "nextLink": next }))
                }),
            )
            .route(
                "/subscriptions-next",
                get(move |headers: HeaderMap| async move {
                    second.lock().unwrap().push(request_id(&headers));
                    Json(json!({ "value": [{ "subscriptionId": "sub-b", "state": "Enabled" }] }))
                }),
            );
        serve(listener, app);

        let subscriptions = SubscriptionClient::new("t")
            .with_base_url(&base)
            .list_subscriptions()
            .await
            .unwrap();

        let ids: Vec<_> = subscriptions.iter().map(|s| s.subscription_id.as_str()).collect();
        assert_eq!(ids, ["sub-a", "sub-b"]);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|id| uuid::Uuid::parse_str(id).is_ok()));
        assert_ne!(seen[0], seen[1]);
    }
}
