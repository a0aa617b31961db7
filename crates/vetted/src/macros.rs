/// Declare a record type and register it at process start.
///
/// ```ignore
/// record!(pub RESOURCE_PROPERTY = RecordNode::new("oscal::ResourceProperty")
///     .parent("oscal::Property")
///     .rules(&[Rule::new(&[RuleField::new("name", &[AllowedValue::text("version")])])]));
/// ```
///
/// The node is emitted as a `const`, so every slice it holds must be
/// const-promotable.
#[macro_export]
macro_rules! record {
    ($(#[$meta:meta])* $vis:vis $name:ident = $node:expr $(,)?) => {
        $(#[$meta])*
        $vis const $name: ::vetted::schema::node::RecordNode = $node;

        #[cfg(not(target_arch = "wasm32"))]
        #[::vetted::__reexports::ctor::ctor(unsafe, anonymous, crate_path = ::vetted::__reexports::ctor)]
        fn __ctor() {
            ::vetted::schema::build::schema_write()
                .insert_node(::vetted::schema::node::SchemaNode::Record($name));
        }
    };
}
