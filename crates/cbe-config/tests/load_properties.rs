//! Property-based tests for the all-or-nothing loader.

use cbe_config::{load, zero_fields, ConfigField, Configuration, Invalid, XmlNode};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
struct Values {
    key_id: u32,
    vbd: [u64; 3],
    ft: [u64; 3],
}

impl Values {
    fn get(&self, field: ConfigField) -> u64 {
        match field {
            ConfigField::KeyId => u64::from(self.key_id),
            ConfigField::VbdLevels => self.vbd[0],
            ConfigField::VbdChildren => self.vbd[1],
            ConfigField::VbdLeaves => self.vbd[2],
            ConfigField::FtLevels => self.ft[0],
            ConfigField::FtChildren => self.ft[1],
            ConfigField::FtLeaves => self.ft[2],
        }
    }
}

fn positive_values() -> impl Strategy<Value = Values> {
    (
        1u32..=u32::MAX,
        [1u64..=u64::MAX, 1u64..=u64::MAX, 1u64..=u64::MAX],
        [1u64..=u64::MAX, 1u64..=u64::MAX, 1u64..=u64::MAX],
    )
        .prop_map(|(key_id, vbd, ft)| Values { key_id, vbd, ft })
}

fn field_strategy() -> impl Strategy<Value = ConfigField> {
    prop::sample::select(ConfigField::ALL.to_vec())
}

/// How a single field is made unusable.
#[derive(Debug, Clone, Copy)]
enum Breakage {
    Absent,
    Zero,
    Garbage,
}

fn breakage_strategy() -> impl Strategy<Value = Breakage> {
    prop_oneof![
        Just(Breakage::Absent),
        Just(Breakage::Zero),
        Just(Breakage::Garbage),
    ]
}

/// Build the three child elements, applying `broken` to one field.
fn children(values: &Values, broken: Option<(ConfigField, Breakage)>) -> [XmlNode; 3] {
    let element = |name: &str, fields: &[ConfigField]| {
        fields.iter().fold(XmlNode::new(name), |node, &field| {
            let text = match broken {
                Some((f, Breakage::Absent)) if f == field => return node,
                Some((f, Breakage::Zero)) if f == field => "0".to_string(),
                Some((f, Breakage::Garbage)) if f == field => "12ab".to_string(),
                _ => values.get(field).to_string(),
            };
            node.with_attribute(field.attribute(), text)
        })
    };

    [
        element("key", &[ConfigField::KeyId]),
        element(
            "virtual-block-device",
            &[
                ConfigField::VbdLevels,
                ConfigField::VbdChildren,
                ConfigField::VbdLeaves,
            ],
        ),
        element(
            "free-tree",
            &[
                ConfigField::FtLevels,
                ConfigField::FtChildren,
                ConfigField::FtLeaves,
            ],
        ),
    ]
}

fn root_from(children: impl IntoIterator<Item = XmlNode>) -> XmlNode {
    children
        .into_iter()
        .fold(XmlNode::new("config"), XmlNode::with_child)
}

fn assert_matches(config: &Configuration, values: &Values) {
    assert_eq!(config.key_id(), values.key_id);
    assert_eq!(config.vbd_levels(), values.vbd[0]);
    assert_eq!(config.vbd_children_per_node(), values.vbd[1]);
    assert_eq!(config.vbd_leaves(), values.vbd[2]);
    assert_eq!(config.ft_levels(), values.ft[0]);
    assert_eq!(config.ft_children_per_node(), values.ft[1]);
    assert_eq!(config.ft_leaves(), values.ft[2]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn positive_values_load_exactly(values in positive_values()) {
        let root = root_from(children(&values, None));
        let config = load(&root).expect("all values positive");
        assert_matches(&config, &values);
        prop_assert!(zero_fields(&root).is_empty());
    }

    #[test]
    fn one_broken_field_rejects_everything(
        values in positive_values(),
        field in field_strategy(),
        breakage in breakage_strategy(),
    ) {
        let root = root_from(children(&values, Some((field, breakage))));
        prop_assert_eq!(load(&root), Err(Invalid));
        prop_assert_eq!(zero_fields(&root), vec![field]);
    }

    #[test]
    fn loading_twice_gives_equal_values(values in positive_values()) {
        let root = root_from(children(&values, None));
        prop_assert_eq!(load(&root), load(&root));
    }

    #[test]
    fn child_order_does_not_matter(
        values in positive_values(),
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
        broken in proptest::option::of((field_strategy(), breakage_strategy())),
    ) {
        let canonical = root_from(children(&values, broken));
        let elements = children(&values, broken);
        let shuffled = root_from(order.iter().map(|&i| elements[i].clone()));

        prop_assert_eq!(load(&canonical), load(&shuffled));
        prop_assert_eq!(zero_fields(&canonical), zero_fields(&shuffled));
    }
}

#[test]
fn missing_element_rejects_its_fields() {
    let values = Values {
        key_id: 5,
        vbd: [3, 4, 64],
        ft: [2, 4, 16],
    };
    let [key, vbd, ft] = children(&values, None);

    let without_key = root_from([vbd.clone(), ft.clone()]);
    assert_eq!(zero_fields(&without_key), vec![ConfigField::KeyId]);

    let without_vbd = root_from([key.clone(), ft]);
    assert_eq!(
        zero_fields(&without_vbd),
        vec![
            ConfigField::VbdLevels,
            ConfigField::VbdChildren,
            ConfigField::VbdLeaves
        ]
    );

    let complete = root_from([key, vbd, XmlNode::new("free-tree")
        .with_attribute("nr_of_levels", "2")
        .with_attribute("nr_of_children", "4")
        .with_attribute("nr_of_leafs", "16")]);
    let config = load(&complete).unwrap();
    assert_matches(&config, &values);
}
