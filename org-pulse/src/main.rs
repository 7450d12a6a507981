//! Tracks daily commit and push activity across the members of a GitHub organization.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    org_pulse_lib::run(std::env::args()).await
}
