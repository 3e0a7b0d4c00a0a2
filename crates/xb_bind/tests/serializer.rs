use xb_bind::{BindErrorKind, XmlBind, XmlSerializer};
use xb_node::{Content, Element};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(XmlBind, Default, Clone, Copy, Debug, PartialEq)]
enum Level {
    #[default]
    Info,
    #[xml(rename = "warning")]
    Warn,
}

#[derive(XmlBind, Default, Clone, Debug, PartialEq)]
#[xml(root = "endpoint")]
struct Endpoint {
    host: String,
    port: u16,
}

#[derive(XmlBind, Default, Clone, Debug, PartialEq)]
#[xml(root = "config")]
struct Config {
    name: String,
    enabled: bool,
    ratio: f64,
    level: Level,
    #[xml(tag = "description")]
    description: Option<String>,
    #[xml(tag = "primary")]
    primary: Endpoint,
    #[xml(tag = "mirrors")]
    mirrors: Vec<Endpoint>,
    #[xml(tag = "tags", element = "tag")]
    tags: Vec<String>,
    ports: Vec<u32>,
}

fn sample() -> Config {
    Config {
        name: "main".into(),
        enabled: true,
        ratio: 0.5,
        level: Level::Warn,
        description: Some("primary & backup".into()),
        primary: Endpoint {
            host: "a.example".into(),
            port: 80,
        },
        mirrors: vec![
            Endpoint {
                host: "b.example".into(),
                port: 8080,
            },
            Endpoint {
                host: "c.example".into(),
                port: 8081,
            },
        ],
        tags: vec!["x".into(), "y".into()],
        ports: vec![1, 2, 3],
    }
}

// -----------------------------------------------------------------------------
// Round trip and layout

#[test]
fn round_trip() {
    let config = sample();
    let tree = XmlSerializer::serialize(&config).unwrap();
    let back: Config = XmlSerializer::deserialize(&tree).unwrap();
    assert_eq!(back, config);

    // And the other way around.
    assert_eq!(XmlSerializer::serialize(&back).unwrap(), tree);
}

#[test]
fn layout() {
    let tree = XmlSerializer::serialize(&sample()).unwrap();
    assert_eq!(
        tree.to_string(),
        concat!(
            r#"<config name="main" enabled="true" ratio="0.5" level="warning">"#,
            "<description>primary &amp; backup</description>",
            r#"<primary><endpoint host="a.example" port="80"/></primary>"#,
            "<mirrors>",
            r#"<endpoint host="b.example" port="8080"/>"#,
            r#"<endpoint host="c.example" port="8081"/>"#,
            "</mirrors>",
            "<tags><tag>x</tag><tag>y</tag></tags>",
            "<ports><item>1</item><item>2</item><item>3</item></ports>",
            "</config>",
        )
    );
}

#[test]
fn children_follow_declaration_order() {
    let tree = XmlSerializer::serialize(&sample()).unwrap();
    let names: Vec<_> = tree.elements().map(Element::name).collect();
    assert_eq!(names, ["description", "primary", "mirrors", "tags", "ports"]);
}

#[test]
fn absent_values_are_omitted() {
    let config = Config {
        description: None,
        mirrors: Vec::new(),
        tags: Vec::new(),
        ports: Vec::new(),
        ..sample()
    };
    let tree = XmlSerializer::serialize(&config).unwrap();
    let names: Vec<_> = tree.elements().map(Element::name).collect();
    assert_eq!(names, ["primary"]);

    let back: Config = XmlSerializer::deserialize(&tree).unwrap();
    assert_eq!(back, config);
}

// -----------------------------------------------------------------------------
// Deserialization rules

#[test]
fn partial_merge_keeps_untouched_fields() {
    let mut config = sample();
    let patch = Element::new("config")
        .with_attribute("port", "ignored")
        .with_attribute("enabled", "false")
        .with_child(Element::new("tags").with_child(Element::new("tag").with_text("z")));
    XmlSerializer::deserialize_into(&mut config, &patch).unwrap();

    let expected = Config {
        enabled: false,
        tags: vec!["x".into(), "y".into(), "z".into()],
        ..sample()
    };
    assert_eq!(config, expected);
}

#[test]
fn nested_bean_is_merged() {
    let mut config = sample();
    let patch = Element::new("config").with_child(
        Element::new("primary").with_child(Element::new("endpoint").with_attribute("port", "443")),
    );
    XmlSerializer::deserialize_into(&mut config, &patch).unwrap();
    assert_eq!(config.primary.host, "a.example");
    assert_eq!(config.primary.port, 443);
}

#[test]
fn list_scenario() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    #[xml(root = "root")]
    struct Items {
        #[xml(tag = "list")]
        items: Vec<String>,
    }

    let tree = Element::new("root").with_child(
        Element::new("list")
            .with_child(Element::new("item").with_text("a"))
            .with_child(Element::new("item").with_text("b")),
    );
    let items: Items = XmlSerializer::deserialize(&tree).unwrap();
    assert_eq!(items.items, ["a", "b"]);
    assert_eq!(XmlSerializer::serialize(&items).unwrap(), tree);
}

#[test]
fn lists_are_appended_on_merge() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    #[xml(root = "root")]
    struct Items {
        #[xml(tag = "list")]
        items: Vec<String>,
        ports: Vec<u16>,
    }

    let mut items = Items {
        items: vec!["x".into()],
        ports: vec![80],
    };
    let tree = Element::new("root")
        .with_child(Element::new("list").with_child(Element::new("item").with_text("a")))
        .with_child(Element::new("ports").with_child(Element::new("item").with_text("443")));
    XmlSerializer::deserialize_into(&mut items, &tree).unwrap();
    assert_eq!(items.items, ["x", "a"]);
    assert_eq!(items.ports, [80, 443]);

    // Nothing said about a list leaves it alone.
    XmlSerializer::deserialize_into(&mut items, &Element::new("root")).unwrap();
    assert_eq!(items.items, ["x", "a"]);
}

#[test]
fn empty_collection_yields_default_text() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    struct Lists {
        #[xml(tag = "plain")]
        plain: Vec<String>,
        #[xml(tag = "named", text_if_empty = "none")]
        named: Vec<String>,
    }

    let tree = Element::new("Lists")
        .with_child(Element::new("plain"))
        .with_child(Element::new("named"));
    let lists: Lists = XmlSerializer::deserialize(&tree).unwrap();
    assert_eq!(lists.plain, [""]);
    assert_eq!(lists.named, ["none"]);
}

#[test]
fn same_label_groups_are_concatenated() {
    let tree = Element::new("config")
        .with_child(Element::new("tags").with_child(Element::new("tag").with_text("a")))
        .with_child(Element::new("tags").with_child(Element::new("tag").with_text("b")));
    let config: Config = XmlSerializer::deserialize(&tree).unwrap();
    assert_eq!(config.tags, ["a", "b"]);
}

#[test]
fn heterogeneous_group_is_rejected() {
    use xb_bind::binding::NodeRef;
    use xb_bind::info::TypedBean;
    use xb_bind::registry::BindingRegistry;

    let bindings = BindingRegistry::global().bindings(Config::type_info()).unwrap();
    let tags = bindings.by_name("tags").unwrap();

    let a = Element::new("tags").with_child(Element::new("tag").with_text("a"));
    let b = Element::new("labels").with_child(Element::new("tag").with_text("b"));
    assert!(tags.is_bound_to(&NodeRef::Element(&a)));
    assert!(!tags.is_bound_to(&NodeRef::Element(&b)));

    let mut config = sample();
    let err = tags
        .deserialize(&mut config, &[NodeRef::Element(&a), NodeRef::Element(&b)])
        .unwrap_err();
    assert!(matches!(err.kind(), BindErrorKind::ShapeMismatch(_)));
    assert_eq!(config.tags, ["x", "y"]);
}

#[test]
fn flat_collection_takes_matching_children() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    struct Flat {
        #[xml(flat)]
        item: Vec<String>,
    }

    let tree = Element::new("Flat")
        .with_child(Element::new("item").with_text("1"))
        .with_child(Element::new("other").with_text("2"))
        .with_child(Element::new("item").with_text("3"));
    let flat: Flat = XmlSerializer::deserialize(&tree).unwrap();
    assert_eq!(flat.item, ["1", "3"]);

    let out = XmlSerializer::serialize(&flat).unwrap();
    assert_eq!(out.to_string(), "<Flat><item>1</item><item>3</item></Flat>");
}

#[test]
fn raw_subtrees() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    struct Holder {
        #[xml(tag = "raw")]
        raw: Element,
        #[xml(raw, tag = "extra")]
        extras: Vec<Element>,
        #[xml(tag = "maybe")]
        maybe: Option<Element>,
    }

    let raw = Element::new("raw").with_attribute("k", "v").with_text("body");
    let tree = Element::new("Holder")
        .with_child(raw.clone())
        .with_child(Element::new("extra").with_text("1"))
        .with_child(Element::new("extra").with_text("2"));
    let holder: Holder = XmlSerializer::deserialize(&tree).unwrap();
    assert_eq!(holder.raw, raw);
    assert_eq!(holder.extras.len(), 2);
    assert_eq!(holder.maybe, None);
    assert_eq!(XmlSerializer::serialize(&holder).unwrap(), tree);

    // A single raw node must be present.
    let err = XmlSerializer::deserialize::<Holder>(&Element::new("Holder")).unwrap_err();
    assert!(matches!(err.kind(), BindErrorKind::ShapeMismatch(_)));
}

#[test]
fn missing_tag_on_nested_bean() {
    #[derive(XmlBind, Default, Clone, Debug)]
    struct Outer {
        inner: Endpoint,
    }

    let err = XmlSerializer::serialize(&Outer::default()).unwrap_err();
    assert_eq!(
        *err.kind(),
        BindErrorKind::AnnotationMissing {
            type_name: "Outer",
            field: "inner"
        }
    );
}

#[test]
fn coercion_failure_carries_field_path() {
    let tree = Element::new("config").with_child(
        Element::new("primary")
            .with_child(Element::new("endpoint").with_attribute("port", "70000")),
    );
    let err = XmlSerializer::deserialize::<Config>(&tree).unwrap_err();
    assert!(matches!(err.kind(), BindErrorKind::CoercionFailure { .. }));
    if cfg!(debug_assertions) {
        assert_eq!(err.path(), ["Config.primary", "Endpoint.port"]);
    }
}

#[test]
fn unknown_enum_variant_fails() {
    let tree = Element::new("config").with_attribute("level", "Warn");
    let err = XmlSerializer::deserialize::<Config>(&tree).unwrap_err();
    assert!(matches!(err.kind(), BindErrorKind::CoercionFailure { .. }));
}

#[test]
fn text_binding() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    #[xml(root = "option")]
    struct Opt {
        name: String,
        #[xml(text)]
        value: i32,
    }

    let opt = Opt {
        name: "depth".into(),
        value: -3,
    };
    let tree = XmlSerializer::serialize(&opt).unwrap();
    assert_eq!(tree.to_string(), r#"<option name="depth">-3</option>"#);
    assert_eq!(XmlSerializer::deserialize::<Opt>(&tree).unwrap(), opt);

    let no_text = Element::new("option").with_child(Content::from(Element::new("x")));
    assert_eq!(XmlSerializer::deserialize::<Opt>(&no_text).unwrap().value, 0);
    let err = XmlSerializer::deserialize::<Opt>(&Element::new("option").with_text("x")).unwrap_err();
    assert!(matches!(err.kind(), BindErrorKind::CoercionFailure { .. }));
}

#[test]
fn empty_optional_text_survives_round_trip() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    #[xml(root = "root")]
    struct Body {
        #[xml(text)]
        body: Option<String>,
    }

    let empty = Body { body: Some(String::new()) };
    let tree = XmlSerializer::serialize(&empty).unwrap();
    assert_eq!(tree, Element::new("root").with_text(""));
    assert_eq!(XmlSerializer::deserialize::<Body>(&tree).unwrap(), empty);

    let absent = XmlSerializer::serialize(&Body::default()).unwrap();
    assert_eq!(absent, Element::new("root"));
    assert_eq!(XmlSerializer::deserialize::<Body>(&absent).unwrap().body, None);
}

#[test]
fn layout_whitespace_is_not_text() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    #[xml(root = "note")]
    struct Note {
        #[xml(tag = "title")]
        title: String,
        #[xml(text)]
        body: String,
    }

    let tree = Element::new("note")
        .with_text("\n  ")
        .with_child(Element::new("title").with_text("t"))
        .with_text("\n  ")
        .with_text("hello")
        .with_text("\n");
    let note: Note = XmlSerializer::deserialize(&tree).unwrap();
    assert_eq!(note.title, "t");
    assert_eq!(note.body, "hello");

    // Without child elements every run is content.
    let spaced = Element::new("note").with_text("  ");
    assert_eq!(XmlSerializer::deserialize::<Note>(&spaced).unwrap().body, "  ");
}

#[test]
fn optional_list_items_are_rejected() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    #[xml(root = "root")]
    struct Opts {
        #[xml(tag = "list")]
        items: Vec<Option<String>>,
    }

    let opts = Opts {
        items: vec![None, Some("a".into())],
    };
    let err = XmlSerializer::serialize(&opts).unwrap_err();
    assert!(matches!(err.kind(), BindErrorKind::ShapeMismatch(_)));
    let err = XmlSerializer::deserialize::<Opts>(&Element::new("root")).unwrap_err();
    assert!(matches!(err.kind(), BindErrorKind::ShapeMismatch(_)));
}

#[test]
fn write_only_fields_are_read_but_never_written() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    struct Secret {
        user: String,
        #[xml(write_only)]
        password: String,
    }

    let tree = Element::new("Secret")
        .with_attribute("user", "root")
        .with_attribute("password", "hunter2");
    let secret: Secret = XmlSerializer::deserialize(&tree).unwrap();
    assert_eq!(secret.password, "hunter2");

    let out = XmlSerializer::serialize(&secret).unwrap();
    assert_eq!(out.to_string(), r#"<Secret user="root"/>"#);

    let info = <Secret as xb_bind::info::TypedBean>::type_info();
    let err = info.accessor("password").unwrap().read(&secret).unwrap_err();
    assert!(matches!(err.kind(), BindErrorKind::UnsupportedOperation(_)));
}

#[test]
fn skipped_fields_are_ignored() {
    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    struct Cache {
        key: String,
        #[xml(skip)]
        hits: u64,
    }

    let cache = Cache {
        key: "k".into(),
        hits: 9,
    };
    let tree = XmlSerializer::serialize(&cache).unwrap();
    assert_eq!(tree.to_string(), r#"<Cache key="k"/>"#);

    let mut target = Cache {
        key: String::new(),
        hits: 2,
    };
    XmlSerializer::deserialize_into(&mut target, &tree).unwrap();
    assert_eq!(target.hits, 2);
}

#[test]
fn generic_beans_get_one_info_per_instantiation() {
    use xb_bind::info::TypedBean;

    #[derive(XmlBind, Default, Clone, Debug, PartialEq)]
    #[xml(root = "pair")]
    struct Pair<T> {
        #[xml(tag = "left")]
        left: T,
        #[xml(tag = "right")]
        right: T,
    }

    let ints = Pair { left: 1_u8, right: 2 };
    let texts = Pair {
        left: String::from("a"),
        right: String::from("b"),
    };
    assert!(!core::ptr::eq(Pair::<u8>::type_info(), Pair::<String>::type_info()));

    let tree = XmlSerializer::serialize(&ints).unwrap();
    assert_eq!(tree.to_string(), "<pair><left>1</left><right>2</right></pair>");
    assert_eq!(XmlSerializer::deserialize::<Pair<u8>>(&tree).unwrap(), ints);

    let tree = XmlSerializer::serialize(&texts).unwrap();
    assert_eq!(XmlSerializer::deserialize::<Pair<String>>(&tree).unwrap(), texts);
}
