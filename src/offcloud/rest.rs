use crate::error::Result;
use crate::offcloud::model::{ApiResponse, DeletionMethod, ResponseBody};
use reqwest::{Client, Method};

use super::OffcloudClient;

pub const DEFAULT_BASE_URL: &str = "https://offcloud.com";

/// Offcloud turns away clients without a browser user agent, so every
/// request masquerades as one.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Public sample file submitted when `create` is run without a URL.
pub const SAMPLE_FILE_URL: &str =
    "https://file-examples.com/storage/fe68c1991b66405f87b4159/2017/10/file_example_JPG_100kB.jpg";

/// Builds the URL for one deletion variant. The paths and the `key`
/// query parameter are the contract with the service and must not change.
fn make_deletion_url(
    base_url: &str,
    api_key: &str,
    method: DeletionMethod,
    request_id: &str,
) -> String {
    match method {
        DeletionMethod::Get => {
            format!("{}/cloud/remove/{}?key={}", base_url, request_id, api_key)
        }
        DeletionMethod::PostForm => format!("{}/api/cloud/delete?key={}", base_url, api_key),
        DeletionMethod::PostDirect => {
            format!("{}/api/cloud/remove/{}?key={}", base_url, request_id, api_key)
        }
    }
}

fn make_create_url(base_url: &str, api_key: &str) -> String {
    format!("{}/api/cloud?key={}", base_url, api_key)
}

impl OffcloudClient {
    /// Creates a new Offcloud client
    ///
    /// # Arguments
    /// * `api_key` - Account API key, sent as the `key` query parameter
    /// * `base_url` - API origin, [`DEFAULT_BASE_URL`] outside of tests
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        // Redirects are not followed; the probe reports the status line
        // each endpoint answers with itself.
        let http_client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            base_url,
        })
    }

    /// Performs one HTTP round trip and decodes whatever comes back.
    ///
    /// A form body, when present, is sent url-encoded with the matching
    /// content type and length. The only error channel is the transport
    /// itself; body decoding cannot fail.
    async fn execute(
        &self,
        method: Method,
        url: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse> {
        let mut request = self.http_client.request(method, url);
        if let Some(fields) = form {
            request = request.form(fields);
        }

        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;

        Ok(ApiResponse {
            status,
            body: ResponseBody::decode(raw),
        })
    }

    /// Runs one deletion variant against a request id
    ///
    /// # Arguments
    /// * `method` - The [`DeletionMethod`] shape to try
    /// * `request_id` - Id of the cloud download to delete
    ///
    /// # Returns
    /// Result containing the [`ApiResponse`] or a transport error
    pub async fn attempt_deletion(
        &self,
        method: DeletionMethod,
        request_id: &str,
    ) -> Result<ApiResponse> {
        let url = self.deletion_url(method, request_id);
        match method {
            DeletionMethod::Get => self.execute(Method::GET, &url, None).await,
            DeletionMethod::PostForm => {
                self.execute(Method::POST, &url, Some(&[("requestId", request_id)]))
                    .await
            }
            DeletionMethod::PostDirect => self.execute(Method::POST, &url, None).await,
        }
    }

    /// The full URL a deletion variant will hit, for display next to the
    /// attempt output.
    pub fn deletion_url(&self, method: DeletionMethod, request_id: &str) -> String {
        make_deletion_url(&self.base_url, &self.api_key, method, request_id)
    }

    /// Submits a new cloud download so its request id can be used to
    /// exercise the deletion endpoints
    ///
    /// # Arguments
    /// * `target_url` - URL of the file Offcloud should fetch
    ///
    /// # Returns
    /// Result containing the [`ApiResponse`]; the assigned id, when the
    /// request was accepted, is in the body's `requestId` field
    pub async fn create_download(&self, target_url: &str) -> Result<ApiResponse> {
        let url = make_create_url(&self.base_url, &self.api_key);
        self.execute(Method::POST, &url, Some(&[("url", target_url)]))
            .await
    }
}
