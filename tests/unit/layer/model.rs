use super::*;

#[test]
fn new_layer_is_opaque_sum_and_visible() {
    let l = Layer::new(3);
    assert_eq!(l.key, LayerKey(3));
    assert_eq!(l.opacity, 1.0);
    assert_eq!(l.blend_mode, BlendMode::Sum);
    assert!(!l.skip);
}

#[test]
fn stacking_order_follows_key_only() {
    let low = Layer::new(-1).with_opacity(0.25);
    let high = Layer::new(7);
    assert_eq!(low.stacking_cmp(&high), Ordering::Less);
    assert_eq!(high.stacking_cmp(&low), Ordering::Greater);
    assert!(Layer::new(2).same_layer(&Layer::new(2).skipped()));
    assert!(!Layer::new(2).same_layer(&Layer::new(3)));
}

#[test]
fn deserializes_with_defaults() {
    let l: Layer = serde_json::from_str(r#"{"key": 4, "opacity": 0.5}"#).unwrap();
    assert_eq!(l.key, LayerKey(4));
    assert_eq!(l.opacity, 0.5);
    assert_eq!(l.blend_mode, BlendMode::Sum);
    assert!(!l.skip);

    let l: Layer = serde_json::from_str(r#"{"blend_mode": "sum", "skip": true}"#).unwrap();
    assert_eq!(l, Layer::new(0).skipped());
}
