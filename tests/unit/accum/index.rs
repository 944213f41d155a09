use std::cell::Cell;

use super::*;
use crate::layer::assign::{GroupedLayers, SingleLayer};
use crate::source::classify::NoTransparency;
use crate::source::transparency::CompanionRegistry;

#[test]
fn empty_sources_give_empty_tables() {
    let idx = AccumIndex::build::<u32, _, _>(&[], &NoTransparency, &SingleLayer::default());
    assert!(idx.is_empty());
    assert_eq!(idx.layer_count(), 0);
    assert!(idx.sorted_order().is_empty());
}

#[test]
fn sorts_by_layer_key_and_keeps_list_order_within_a_layer() {
    let sources = [10u32, 11, 12, 13, 14];
    let mut layers = GroupedLayers::new(Layer::new(0));
    layers.assign(10, Layer::new(2));
    layers.assign(11, Layer::new(-1));
    layers.assign(13, Layer::new(2));
    let idx = AccumIndex::build(&sources, &NoTransparency, &layers);

    // 11 (-1), then 12 and 14 (0), then 10 and 13 (2).
    assert_eq!(idx.sorted_order(), &[1, 2, 4, 0, 3]);
    assert_eq!(idx.layer_count(), 3);

    let boundaries: Vec<usize> = (0..sources.len())
        .filter(|&i| idx.is_layer_boundary(i))
        .collect();
    assert_eq!(boundaries, vec![1, 3, 4]);
}

#[test]
fn single_layer_has_one_boundary_on_the_last_source() {
    let idx = AccumIndex::build(&[1u8, 2, 3], &NoTransparency, &SingleLayer::default());
    assert_eq!(idx.sorted_order(), &[0, 1, 2]);
    assert!(!idx.is_layer_boundary(0));
    assert!(!idx.is_layer_boundary(1));
    assert!(idx.is_layer_boundary(2));
    assert_eq!(idx.layer_count(), 1);
}

#[test]
fn assigner_is_queried_once_per_source() {
    let calls = Cell::new(0usize);
    let assigner = |s: &u32| {
        calls.set(calls.get() + 1);
        Layer::new(i64::from(*s) % 3)
    };
    let sources: Vec<u32> = (0..9).collect();
    let idx = AccumIndex::build(&sources, &NoTransparency, &assigner);
    assert_eq!(calls.get(), sources.len());
    assert_eq!(idx.layer_count(), 3);
}

#[test]
fn snapshots_layer_properties_per_source() {
    let mut layers = GroupedLayers::new(Layer::new(0));
    layers.assign("a", Layer::new(1).with_opacity(0.25));
    layers.assign("b", Layer::new(2).skipped());
    let idx = AccumIndex::build(&["a", "b", "c"], &NoTransparency, &layers);

    assert_eq!(idx.opacity(0), 0.25);
    assert!(!idx.skip(0));
    assert!(idx.skip(1));
    assert_eq!(idx.opacity(2), 1.0);
    assert_eq!(idx.blend_mode(2), BlendMode::Sum);
}

#[test]
fn folds_in_transparency_links() {
    let mut reg = CompanionRegistry::new();
    reg.link("gfp", "gfp.alpha").unwrap();
    reg.link("dapi", "dapi.alpha").unwrap();
    let sources = ["gfp.alpha", "dapi", "gfp"];
    let idx = AccumIndex::build(&sources, &reg, &SingleLayer::default());

    assert!(idx.is_transparency_source(0));
    assert_eq!(idx.linked_index(2), Some(0));
    assert!(!idx.has_linked_transparency(1));
    assert!(!idx.has_linked_transparency(0));
}
