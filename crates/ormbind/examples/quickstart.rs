//! Categorize and bind a small payment domain, then print the bound
//! schema as JSON.
//!
//! Run with: `cargo run --example quickstart`

use ormbind::model::{
    ClassDetails, ColumnSpec, InheritanceKind, Marker, MemberDetails, ModelRegistry,
};
use ormbind::{bind, categorize, BindOptions};

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ormbind=debug".parse().unwrap()),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = ModelRegistry::new();

    registry.add_class(
        ClassDetails::new("AuditedBase")
            .with_marker(Marker::MappedSuperclass)
            .with_field(MemberDetails::field("id").with_marker(Marker::Id))
            .with_field(MemberDetails::field("createdAt").with_marker(Marker::Temporal)),
    )?;
    registry.add_class(
        ClassDetails::new("Payment")
            .extends("AuditedBase")
            .with_marker(Marker::Entity { name: None })
            .with_marker(Marker::Table {
                name: "payments".into(),
            })
            .with_marker(Marker::Inheritance {
                strategy: InheritanceKind::Joined,
            })
            .with_field(MemberDetails::field("version").with_marker(Marker::Version))
            .with_field(
                MemberDetails::field("amount").with_marker(Marker::Column(
                    ColumnSpec::named("amount_minor").not_null(),
                )),
            )
            .with_field(MemberDetails::field("currency")),
    )?;
    registry.add_class(
        ClassDetails::new("CardPayment")
            .extends("Payment")
            .with_marker(Marker::Entity { name: None })
            .with_field(MemberDetails::field("lastFour")),
    )?;

    let categorized = categorize(&registry)?;
    let bound = bind(&categorized, &BindOptions::default())?;

    println!("{}", serde_json::to_string_pretty(&bound)?);
    Ok(())
}
