//! Request a card verification link.
//!
//! ```sh
//! FONDY_MERCHANT_ID=1396424 FONDY_MERCHANT_KEY=test FONDY_CREDIT_KEY=testcredit \
//!     RUST_LOG=fondy_kit=debug cargo run --example card_verification
//! ```

use std::{env, time::Duration};

use fondy_core::{
    merchant::{MerchantAccount, MerchantFlowType},
    types::Currency,
};
use fondy_kit::{
    config::{HttpConfig, Options},
    gateway::Gateway,
    operations::VerificationRequest,
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn var(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let http = HttpConfig::builder()
        .connect_timeout(Duration::from_secs(30))
        .keep_alive(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(20))
        .request_timeout(Duration::from_secs(60))
        .log_payloads(true)
        .build();

    let options = Options::builder()
        .verification_amount(1)
        .verification_description("Verification Test")
        .verification_lifetime(Duration::from_secs(600))
        .callback_base_url(var("FONDY_CALLBACK_BASE_URL", "https://example.com"))
        .callback_path("/fondy/verification")
        .build();

    let merchant = MerchantAccount::builder()
        .uuid(Uuid::new_v4())
        .name("Test Merchant")
        .merchant_string("Merchant account for testing")
        .added_description("MRCH01")
        .flow_type(MerchantFlowType::Payment)
        .merchant_id(var("FONDY_MERCHANT_ID", "1396424"))
        .merchant_key(var("FONDY_MERCHANT_KEY", "test"))
        .credit_key(var("FONDY_CREDIT_KEY", "testcredit"))
        .design_id(var("FONDY_DESIGN_ID", "1"))
        .build();

    let gateway = Gateway::from_config(&http, options)?;

    let link = gateway
        .verification_link(
            &merchant,
            &VerificationRequest::builder()
                .invoice_id(Uuid::new_v4())
                .note("Test Verification")
                .currency(Currency::Uah)
                .build(),
        )
        .await?;

    println!("Verification link: {link}");
    Ok(())
}
