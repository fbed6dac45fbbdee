//! End-to-end pipeline scenarios: fit, placement, routing, ties, metrics.

use ropekit_core::constants::{entry_point, GRID_HEIGHT_IN, GRID_WIDTH_IN};
use ropekit_core::path::{GlyphOutline, PathCommand};
use ropekit_planner::routing::{BlackoutClass, LitClass};
use ropekit_planner::{compute_plan, GridSpacing, Offset, PlanConfig, Segment};

/// A solid bar glyph, like a sans-serif capital I. Font units, y-down.
fn bar_outline() -> GlyphOutline {
    GlyphOutline {
        commands: vec![
            PathCommand::MoveTo { x: 100.0, y: 0.0 },
            PathCommand::LineTo { x: 500.0, y: 0.0 },
            PathCommand::LineTo { x: 500.0, y: -600.0 },
            PathCommand::LineTo { x: 100.0, y: -600.0 },
            PathCommand::Close,
        ],
        units_per_em: 1000,
        advance_width: 600.0,
    }
}

/// A rectangular ring glyph, like a squared-off capital O: an outer boundary
/// plus an oppositely wound counter.
fn ring_outline() -> GlyphOutline {
    GlyphOutline {
        commands: vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::LineTo { x: 500.0, y: 0.0 },
            PathCommand::LineTo { x: 500.0, y: -700.0 },
            PathCommand::LineTo { x: 0.0, y: -700.0 },
            PathCommand::Close,
            PathCommand::MoveTo { x: 100.0, y: -100.0 },
            PathCommand::LineTo { x: 100.0, y: -600.0 },
            PathCommand::LineTo { x: 400.0, y: -600.0 },
            PathCommand::LineTo { x: 400.0, y: -100.0 },
            PathCommand::Close,
        ],
        units_per_em: 1000,
        advance_width: 600.0,
    }
}

fn config(text: &str) -> PlanConfig {
    PlanConfig {
        text: text.to_string(),
        font_name: "Test Sans".to_string(),
        snap_tolerance: 0.0,
        ..PlanConfig::default()
    }
}

#[test]
fn test_bar_routes_as_single_lit_run() {
    let plan = compute_plan(&config("I"), &bar_outline()).unwrap();

    assert_eq!(plan.segments.len(), 3);
    let Segment::Blackout {
        classification: first_class,
        from,
        ..
    } = &plan.segments[0]
    else {
        panic!("route must open with a blackout connector");
    };
    assert_eq!(*first_class, BlackoutClass::Entry);
    assert_eq!(*from, entry_point());

    let Segment::Lit {
        classification,
        length,
        ..
    } = &plan.segments[1]
    else {
        panic!("middle segment must be lit");
    };
    assert_eq!(*classification, LitClass::Outer);

    // 400 x 600 font units at 76.8 in target height: scale 0.128, so the
    // perimeter is 2 * (51.2 + 76.8) = 256 in.
    assert!((length - 256.0).abs() / 256.0 < 0.01);

    let Segment::Blackout {
        classification: last_class,
        to,
        ..
    } = plan.segments.last().unwrap()
    else {
        panic!("route must close with a blackout connector");
    };
    assert_eq!(*last_class, BlackoutClass::Return);
    assert_eq!(*to, entry_point());
}

#[test]
fn test_blackout_total_matches_connector_sum() {
    let plan = compute_plan(&config("I"), &bar_outline()).unwrap();
    let connector_sum: f64 = plan
        .segments
        .iter()
        .filter(|s| !s.is_lit())
        .map(Segment::length)
        .sum();
    assert!((plan.metrics.total_blackout - connector_sum).abs() < 1e-6);
    assert!(
        (plan.metrics.total_overall - plan.metrics.total_lit - plan.metrics.total_blackout).abs()
            < 1e-6
    );
}

#[test]
fn test_ring_routes_outer_then_hole() {
    let plan = compute_plan(&config("O"), &ring_outline()).unwrap();

    // entry, lit outer, inner-jump, lit hole, return
    assert_eq!(plan.segments.len(), 5);
    let classes: Vec<Option<BlackoutClass>> = plan
        .segments
        .iter()
        .map(|s| match s {
            Segment::Blackout { classification, .. } => Some(*classification),
            Segment::Lit { .. } => None,
        })
        .collect();
    assert_eq!(
        classes,
        vec![
            Some(BlackoutClass::Entry),
            None,
            Some(BlackoutClass::InnerJump),
            None,
            Some(BlackoutClass::Return),
        ]
    );

    let lit_classes: Vec<LitClass> = plan
        .segments
        .iter()
        .filter_map(|s| match s {
            Segment::Lit { classification, .. } => Some(*classification),
            _ => None,
        })
        .collect();
    assert_eq!(lit_classes, vec![LitClass::Outer, LitClass::Inner]);

    let glyph = &plan.glyphs[0];
    let holes: Vec<bool> = glyph.contours.iter().map(|c| c.is_hole).collect();
    assert_eq!(holes.iter().filter(|h| **h).count(), 1);
}

#[test]
fn test_per_letter_metrics_accumulate() {
    let plan = compute_plan(&config("O"), &ring_outline()).unwrap();
    assert_eq!(plan.letters.len(), 1);
    let letter = &plan.letters[0];
    assert_eq!(letter.ch, 'O');
    assert!((letter.lit_length - plan.metrics.total_lit).abs() < 1e-6);
    assert!((letter.blackout_length - plan.metrics.total_blackout).abs() < 1e-6);
    assert_eq!(letter.segment_count, plan.segments.len());
}

#[test]
fn test_manual_offset_shifts_strict_plan_exactly() {
    let strict = PlanConfig {
        strict_manual: true,
        ..config("I")
    };
    let shifted = PlanConfig {
        manual_offset: Offset::new(5.0, -3.0),
        ..strict.clone()
    };
    let base = compute_plan(&strict, &bar_outline()).unwrap();
    let moved = compute_plan(&shifted, &bar_outline()).unwrap();

    let a = base.layout.bounds.unwrap();
    let b = moved.layout.bounds.unwrap();
    assert!((b.min_x - a.min_x - 5.0).abs() < 1e-6);
    assert!((b.max_x - a.max_x - 5.0).abs() < 1e-6);
    assert!((b.min_y - a.min_y + 3.0).abs() < 1e-6);

    // Lengths are translation-invariant.
    assert!((base.metrics.total_lit - moved.metrics.total_lit).abs() < 1e-6);
}

#[test]
fn test_snap_preserves_lit_lengths() {
    // Grid snap is a pure translation, so lit rope totals must match the
    // strict-manual placement of the same glyph.
    let strict = PlanConfig {
        strict_manual: true,
        ..config("I")
    };
    let snapped = config("I");
    let a = compute_plan(&strict, &bar_outline()).unwrap();
    let b = compute_plan(&snapped, &bar_outline()).unwrap();
    assert!((a.metrics.total_lit - b.metrics.total_lit).abs() < 1e-6);

    // And the snapped lower-left corner lands on a grid intersection.
    let bounds = b.layout.bounds.unwrap();
    let spacing = b.metadata.grid_spacing_in;
    assert!((bounds.min_x / spacing.x - (bounds.min_x / spacing.x).round()).abs() < 1e-6);
    assert!((bounds.min_y / spacing.y - (bounds.min_y / spacing.y).round()).abs() < 1e-6);
}

#[test]
fn test_ties_stay_on_grid() {
    let plan = compute_plan(&config("O"), &ring_outline()).unwrap();
    assert!(!plan.tie_points.is_empty());
    for tie in &plan.tie_points {
        assert!(tie.x >= -1e-4 && tie.x <= GRID_WIDTH_IN + 1e-4);
        assert!(tie.y >= -1e-4 && tie.y <= GRID_HEIGHT_IN + 1e-4);
    }
}

#[test]
fn test_grid_fit_straightens_near_vertical_stroke() {
    // A slightly skewed bar: with a generous tolerance the near-vertical
    // stroke snaps onto a grid column.
    let skewed = GlyphOutline {
        commands: vec![
            PathCommand::MoveTo { x: 100.0, y: 0.0 },
            PathCommand::LineTo { x: 500.0, y: 0.0 },
            PathCommand::LineTo { x: 502.0, y: -600.0 },
            PathCommand::LineTo { x: 102.0, y: -600.0 },
            PathCommand::Close,
        ],
        units_per_em: 1000,
        advance_width: 600.0,
    };
    let cfg = PlanConfig {
        snap_tolerance: 0.75,
        ..config("I")
    };
    let plan = compute_plan(&cfg, &skewed).unwrap();
    let lit: Vec<&Segment> = plan.segments.iter().filter(|s| s.is_lit()).collect();
    assert_eq!(lit.len(), 1);

    // The skew is 2 font units = 0.256 in, inside tolerance, so the
    // explicit vertical straightens onto a grid column and the lit run is
    // within 1% of the bounding-box perimeter.
    let bounds = plan.layout.bounds.unwrap();
    let perimeter = 2.0 * (bounds.width + bounds.height);
    assert!((lit[0].length() - perimeter).abs() / perimeter < 0.01);
}
