//! Namespace builder usage: one registry per owning component.
//!
//! Run with: cargo run --example namespaced_registry

use cairn_errors::{Builder, Error, Options};

fn main() {
    // A builder with a custom fallback. The fallback's namespace is forced
    // to the builder's own.
    let mut api_errs = Builder::new_with(
        "api",
        Options::new().fallback_error(Error::new_with(
            "500",
            "Internal Server Error",
            Options::new().add_metadata("httpStatus", 500),
        )),
    );

    let not_found = api_errs.new_error_with(
        "404",
        "Resource not found",
        Options::new().add_metadata("httpStatus", 404),
    );
    let bad_request = api_errs.new_error_with(
        "400",
        "Bad request",
        Options::new().add_metadata("httpStatus", 400),
    );

    println!("registered:\n{not_found}\n{bad_request}\n");

    // Lookups never miss: unknown codes resolve to the fallback.
    let resolved = api_errs.get("404");
    assert!(resolved.is(&not_found));

    let unknown = api_errs.get("418");
    assert!(unknown.is(api_errs.fallback_error()));
    println!("unknown code resolves to:\n{unknown}\n");

    // Namespace forcing: a caller-supplied namespace option is overridden.
    let forced = api_errs.new_error_with(
        "409",
        "Conflict",
        Options::new().namespace("somewhere-else"),
    );
    assert_eq!(forced.namespace(), Some("api"));
    println!("forced namespace:\n{forced}");
}
