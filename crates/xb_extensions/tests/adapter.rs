use xb_bind::registry::BeanRegistry;
use xb_bind::{BindErrorKind, XmlBind};
use xb_extensions::{
    ELEMENT_IMPLEMENTATION, ExtensionComponentAdapter, ExtensionError, LoadingOrder, Orderable,
    PluginAware, PluginAwareRegistry, PluginDescriptor,
};
use xb_node::Element;

// -----------------------------------------------------------------------------
// Fixtures

#[derive(XmlBind, Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "auto_register", xml(auto_register))]
struct FileType {
    name: String,
    extensions: String,
    #[xml(tag = "icon", raw)]
    icon: Option<Element>,
    #[xml(skip)]
    plugin: Option<PluginDescriptor>,
}

impl PluginAware for FileType {
    fn set_plugin_descriptor(&mut self, descriptor: PluginDescriptor) {
        self.plugin = Some(descriptor);
    }
}

#[derive(XmlBind, Default, Clone, Debug, PartialEq)]
struct Counter {
    limit: u8,
}

fn registry() -> BeanRegistry {
    PluginAwareRegistry::global().register::<FileType>();
    let mut registry = BeanRegistry::new();
    registry.register::<FileType>();
    registry.register::<Counter>();
    registry
}

fn descriptor() -> PluginDescriptor {
    PluginDescriptor::new("org.example.files").with_name("Files")
}

fn file_type(id: &str, order: Option<&str>) -> ExtensionComponentAdapter {
    let mut element = Element::new("fileType")
        .with_attribute("id", id)
        .with_attribute("name", id)
        .with_attribute("extensions", "txt;md");
    if let Some(order) = order {
        element.set_attribute("order", order);
    }
    ExtensionComponentAdapter::new("FileType", element, Some(descriptor()), true)
}

// -----------------------------------------------------------------------------
// Instances

#[test]
fn creates_and_fills_instance() {
    let registry = registry();
    let adapter = file_type("text", None);
    assert!(!adapter.is_instantiated());

    let instance = adapter.extension::<FileType>(&registry).unwrap();
    let expected = FileType {
        name: "text".into(),
        extensions: "txt;md".into(),
        plugin: Some(descriptor()),
        ..Default::default()
    };
    assert_eq!(instance, &expected);
    assert!(adapter.is_instantiated());
    assert_eq!(adapter.plugin_id().map(|id| id.as_str()), Some("org.example.files"));
}

#[test]
fn instance_is_created_once() {
    let registry = registry();
    let adapter = file_type("text", None);
    let a = adapter.instance(&registry).unwrap();
    let b = adapter.instance(&registry).unwrap();
    assert!(core::ptr::eq(a, b));
}

#[test]
fn without_deserialization_instance_is_default() {
    let registry = registry();
    let element = Element::new("counter").with_attribute("limit", "3");
    let adapter = ExtensionComponentAdapter::new("Counter", element, None, false);
    assert_eq!(adapter.extension::<Counter>(&registry).unwrap(), &Counter::default());
}

#[test]
fn element_implementation_yields_element() {
    let registry = BeanRegistry::new();
    let element = Element::new("option").with_attribute("key", "value");
    let adapter = ExtensionComponentAdapter::new(ELEMENT_IMPLEMENTATION, element.clone(), None, true);

    let instance = adapter.instance(&registry).unwrap();
    assert_eq!(instance.as_element(), Some(&element));
    assert!(instance.as_bean().is_none());
    assert!(matches!(
        adapter.extension::<Counter>(&registry),
        Err(ExtensionError::TypeMismatch { .. })
    ));
}

#[test]
fn unknown_implementation() {
    let registry = registry();
    let adapter = ExtensionComponentAdapter::new("Missing", Element::new("x"), None, true);
    assert_eq!(
        adapter.instance(&registry).unwrap_err(),
        ExtensionError::UnknownImplementation("Missing".into())
    );
    assert!(!adapter.is_instantiated());
}

#[test]
fn binding_failure_is_reported_and_not_cached() {
    let registry = registry();
    let element = Element::new("counter").with_attribute("limit", "1000");
    let adapter = ExtensionComponentAdapter::new("Counter", element, None, true);

    match adapter.instance(&registry) {
        Err(ExtensionError::Bind { implementation, source }) => {
            assert_eq!(implementation, "Counter");
            assert!(matches!(source.kind(), BindErrorKind::CoercionFailure { .. }));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(!adapter.is_instantiated());
}

#[test]
fn raw_children_reach_the_instance() {
    let registry = registry();
    let icon = Element::new("icon").with_attribute("path", "/icons/text.svg");
    let element = Element::new("fileType")
        .with_attribute("name", "text")
        .with_child(icon.clone());
    let adapter = ExtensionComponentAdapter::new("FileType", element, None, true);

    let instance = adapter.extension::<FileType>(&registry).unwrap();
    assert_eq!(instance.icon.as_ref(), Some(&icon));
    assert_eq!(instance.plugin, None);
}

#[test]
fn assignability_by_name() {
    let adapter = file_type("text", None);
    assert!(adapter.is_assignable_to("FileType"));
    assert!(!adapter.is_assignable_to("Counter"));
    assert_eq!(adapter.implementation_name(), "FileType");
    assert_eq!(adapter.describing_element().name(), "fileType");
}

// -----------------------------------------------------------------------------
// Ordering

#[test]
fn order_attributes() {
    let adapter = file_type("text", Some("first, before xml"));
    assert_eq!(adapter.order_id(), Some("text"));
    let order = adapter.order().unwrap();
    assert!(order.is_first());
    assert_eq!(order.before_ids().collect::<Vec<_>>(), ["xml"]);

    assert_eq!(file_type("plain", None).order().unwrap(), LoadingOrder::ANY);
    assert!(matches!(
        file_type("bad", Some("early")).order(),
        Err(ExtensionError::InvalidOrder(_))
    ));
}

#[test]
fn adapters_sort_by_order() {
    let mut adapters = vec![
        file_type("xml", Some("last")),
        file_type("json", Some("after yaml")),
        file_type("yaml", None),
        file_type("text", Some("first")),
    ];
    LoadingOrder::sort(&mut adapters).unwrap();
    let ids: Vec<_> = adapters.iter().filter_map(Orderable::order_id).collect();
    assert_eq!(ids, ["text", "yaml", "json", "xml"]);
}

#[test]
fn cyclic_adapters_fail() {
    let mut adapters = vec![
        file_type("a", Some("before b")),
        file_type("b", Some("before a")),
    ];
    assert_eq!(
        LoadingOrder::sort(&mut adapters),
        Err(ExtensionError::Cycle(vec!["a".into(), "b".into()]))
    );
}

#[cfg(feature = "auto_register")]
#[test]
fn auto_registered_implementation() {
    let mut registry = BeanRegistry::new();
    assert!(registry.auto_register());
    let adapter = file_type("text", None);
    assert_eq!(adapter.extension::<FileType>(&registry).unwrap().name, "text");
}
