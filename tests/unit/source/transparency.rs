use super::*;

#[test]
fn bit_reinterpretation_is_exact_at_boundaries() {
    for v in [0.0f32, 0.5, 1.0] {
        let bits = float_to_channel_bits(v);
        assert_eq!(channel_bits_to_float(bits).to_bits(), v.to_bits());
    }
    assert_eq!(float_to_channel_bits(1.0), 0x3F80_0000);
    assert_eq!(float_to_channel_bits(0.0), 0);
}

#[test]
fn bit_reinterpretation_keeps_arbitrary_values() {
    for v in [0.1f32, 0.333_333_34, 0.75, 1.0e-7] {
        assert_eq!(channel_bits_to_float(float_to_channel_bits(v)), v);
    }
}

#[test]
fn registry_links_and_classifies() {
    let mut reg = CompanionRegistry::new();
    assert_eq!(reg.link(1u32, 101).unwrap(), None);
    assert_eq!(reg.link(2u32, 102).unwrap(), None);

    assert!(reg.has_transparency_companion(&1));
    assert!(!reg.has_transparency_companion(&101));
    assert!(reg.is_transparency_source(&101));
    assert!(!reg.is_transparency_source(&1));
    assert_eq!(reg.transparency_companion_of(&2), Some(102));
    assert_eq!(reg.len(), 2);
}

#[test]
fn registry_rejects_self_links() {
    let mut reg = CompanionRegistry::new();
    assert!(matches!(
        reg.link(5u32, 5),
        Err(StackcompError::Validation(_))
    ));
    assert!(reg.companion_or_insert_with(6u32, |s| *s).is_err());
    assert!(reg.is_empty());
}

#[test]
fn lazy_insert_only_creates_once() {
    let mut reg = CompanionRegistry::new();
    let mut made = 0;
    for _ in 0..3 {
        let c = *reg
            .companion_or_insert_with("gfp", |_| {
                made += 1;
                "gfp.alpha"
            })
            .unwrap();
        assert_eq!(c, "gfp.alpha");
    }
    assert_eq!(made, 1);
}

#[test]
fn invalidate_drops_every_link() {
    let mut reg = CompanionRegistry::new();
    reg.link("a", "a.alpha").unwrap();
    reg.link("b", "b.alpha").unwrap();
    assert_eq!(reg.unlink(&"a"), Some("a.alpha"));
    reg.invalidate();
    assert!(reg.is_empty());
    assert_eq!(reg.companion(&"b"), None);
    assert!(!reg.is_transparency_source(&"b.alpha"));
}
