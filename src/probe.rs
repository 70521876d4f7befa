use crate::error::Result;
use crate::offcloud::model::{AttemptOutcome, DeletionMethod};
use crate::offcloud::OffcloudClient;

const RULE_WIDTH: usize = 60;

pub struct Prober {
    client: OffcloudClient,
}

impl Prober {
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        let client = OffcloudClient::new(api_key, base_url)?;
        Ok(Self { client })
    }

    /// Tries every deletion variant against one request id and prints the
    /// report. Attempts run one at a time, in declaration order, so their
    /// output never interleaves. A failed attempt never stops the run.
    pub async fn run(&self, request_id: &str) -> Vec<AttemptOutcome> {
        println!("Testing deletion methods for request ID: {}", request_id);
        println!("{}", "=".repeat(RULE_WIDTH));

        let mut results = Vec::with_capacity(DeletionMethod::ALL.len());
        for (index, method) in DeletionMethod::ALL.into_iter().enumerate() {
            results.push(self.attempt(index, method, request_id).await);
        }

        print_summary(&results);
        results
    }

    async fn attempt(
        &self,
        index: usize,
        method: DeletionMethod,
        request_id: &str,
    ) -> AttemptOutcome {
        println!("\n=== Testing Method {}: {} ===", index + 1, method.endpoint());
        println!("URL: {}", self.client.deletion_url(method, request_id));

        match self.client.attempt_deletion(method, request_id).await {
            Ok(response) => {
                println!("Status: {}", response.status.as_u16());
                println!("Response: {}", response.body);
                AttemptOutcome::from_response(method, response)
            }
            Err(e) => {
                println!("Error: {}", e);
                AttemptOutcome::from_error(method, e.to_string())
            }
        }
    }
}

/// First successful attempt wins, in probe order.
pub fn recommend(results: &[AttemptOutcome]) -> Option<DeletionMethod> {
    results.iter().find(|r| r.success).map(|r| r.method)
}

fn print_summary(results: &[AttemptOutcome]) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("SUMMARY:");
    println!("{}", "=".repeat(RULE_WIDTH));

    for (index, result) in results.iter().enumerate() {
        let status = if result.success {
            "✅ SUCCESS"
        } else {
            "❌ FAILED"
        };
        println!("Method {} ({}): {}", index + 1, result.method.label(), status);
        if let Some(error) = &result.error {
            println!("  Error: {}", error);
        }
    }

    match recommend(results) {
        Some(method) => println!("\nRECOMMENDATION: Use {} method", method.label()),
        None => println!("\nNOTE: No methods worked - check API key and request ID"),
    }
}

/// Creates a fresh download request and returns its id, so the deletion
/// variants have something real to aim at. Failures are reported on the
/// console, never propagated.
pub async fn create_test_download(client: &OffcloudClient, target_url: &str) -> Option<String> {
    println!("Creating test download...");
    match client.create_download(target_url).await {
        Ok(response) => match response.request_id() {
            Some(id) => {
                println!("Test download created with ID: {}", id);
                Some(id.to_string())
            }
            None => {
                println!("Failed to create test download: {}", response.body);
                None
            }
        },
        Err(e) => {
            println!("Error creating test download: {}", e);
            None
        }
    }
}
