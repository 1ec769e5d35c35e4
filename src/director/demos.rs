//! Scripted demo timelines.

use glam::Vec3;
use std::time::Duration;

use super::step::DemoKind;
use super::timeline::TimedEvent;

pub const POINT_RADIUS: f32 = 0.4;
pub const POINT_HALO_RADIUS: f32 = 0.6;
pub const POINT_HALO_OPACITY: f32 = 0.2;
pub const POINT_TRAVEL: Duration = Duration::from_millis(800);

const COLOR_INTERVAL: Duration = Duration::from_millis(2000);
const MOVEMENT_INTERVAL: Duration = Duration::from_millis(2500);
const CLUSTER_INTERVAL: Duration = Duration::from_millis(2000);
const CLUSTER_STAGGER: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub enum DemoAction {
    /// Replace the demo panel text.
    Explain {
        heading: &'static str,
        paragraphs: Vec<String>,
    },
    /// Add a point that travels to `target`.
    SpawnPoint {
        target: Vec3,
        hex: u32,
        label: String,
        /// Start from the previous moving point and replace it.
        continue_from_last: bool,
    },
    /// Append the closing notes.
    Conclude { notes: Vec<&'static str> },
}

struct ColorSample {
    name: &'static str,
    hex: u32,
    position: [f32; 3],
    rgb: [f32; 3],
}

const COLOR_SAMPLES: [ColorSample; 5] = [
    ColorSample {
        name: "Red Rose",
        hex: 0xff4444,
        position: [3.0, -1.0, -1.0],
        rgb: [0.8, 0.2, 0.2],
    },
    ColorSample {
        name: "Green Leaf",
        hex: 0x44ff44,
        position: [-1.0, 3.0, -1.0],
        rgb: [0.2, 0.8, 0.2],
    },
    ColorSample {
        name: "Blue Ocean",
        hex: 0x4444ff,
        position: [-1.0, -1.0, 3.0],
        rgb: [0.2, 0.2, 0.8],
    },
    ColorSample {
        name: "Yellow Sun",
        hex: 0xffff44,
        position: [2.0, 2.0, -2.0],
        rgb: [0.9, 0.9, 0.1],
    },
    ColorSample {
        name: "Purple Grape",
        hex: 0xff44ff,
        position: [2.0, -2.0, 2.0],
        rgb: [0.8, 0.2, 0.8],
    },
];

const MOVEMENTS: [([f32; 3], &str, u32); 6] = [
    ([0.0, 0.0, 0.0], "Neutral image (balanced colors)", 0xaaaaaa),
    ([3.0, 0.0, 0.0], "Adding red content...", 0xff6666),
    ([3.0, 3.0, 0.0], "Adding green content...", 0xffaa66),
    ([3.0, 3.0, 3.0], "Adding blue content...", 0xffffff),
    ([1.0, 4.0, 1.0], "Green-dominant nature scene", 0x66ff66),
    ([4.0, 1.0, 1.0], "Red-dominant flower", 0xff6666),
];

const CLUSTERS: [(&str, u32, [[f32; 3]; 4]); 3] = [
    (
        "Red Flowers",
        0xff4444,
        [[3.2, 0.1, -0.1], [2.8, -0.2, 0.2], [3.1, 0.3, -0.1], [2.9, -0.1, 0.1]],
    ),
    (
        "Green Plants",
        0x44ff44,
        [[-0.1, 3.2, 0.1], [0.2, 2.8, -0.2], [-0.1, 3.1, 0.3], [0.1, 2.9, -0.1]],
    ),
    (
        "Blue Water",
        0x4444ff,
        [[0.1, -0.1, 3.2], [-0.2, 0.2, 2.8], [0.3, -0.1, 3.1], [-0.1, 0.1, 2.9]],
    ),
];

pub fn demo_heading(kind: DemoKind) -> &'static str {
    match kind {
        DemoKind::Color => "Color Feature Demonstration",
        DemoKind::Movement => "Point Movement Demonstration",
        DemoKind::Cluster => "Image Clustering Demonstration",
    }
}

pub fn demo_intro(kind: DemoKind) -> &'static str {
    match kind {
        DemoKind::Color => {
            "Watch how different colored images appear in different regions of 3D space!"
        }
        DemoKind::Movement => "Watch how changing image features moves the point in 3D space!",
        DemoKind::Cluster => "See how similar images cluster together in 3D space!",
    }
}

fn fmt_position(p: [f32; 3]) -> String {
    format!("({}, {}, {})", p[0], p[1], p[2])
}

fn percent(c: f32) -> String {
    format!("{:.0}%", c * 100.0)
}

fn color_timeline() -> Vec<TimedEvent<DemoAction>> {
    let heading = demo_heading(DemoKind::Color);
    let mut events = Vec::new();
    for (i, sample) in COLOR_SAMPLES.iter().enumerate() {
        let at = COLOR_INTERVAL * i as u32;
        events.push(TimedEvent::new(
            at,
            DemoAction::Explain {
                heading,
                paragraphs: vec![
                    format!("Currently showing: {}", sample.name),
                    format!(
                        "RGB: ({}, {}, {})",
                        percent(sample.rgb[0]),
                        percent(sample.rgb[1]),
                        percent(sample.rgb[2])
                    ),
                    format!("Position: {}", fmt_position(sample.position)),
                ],
            },
        ));
        events.push(TimedEvent::new(
            at,
            DemoAction::SpawnPoint {
                target: Vec3::from_array(sample.position),
                hex: sample.hex,
                label: sample.name.to_string(),
                continue_from_last: false,
            },
        ));
    }
    events.push(TimedEvent::new(
        COLOR_INTERVAL * COLOR_SAMPLES.len() as u32,
        DemoAction::Conclude {
            notes: vec![
                "Notice: Each color appears in its corresponding region!",
                "Red images → Positive X-axis",
                "Green images → Positive Y-axis",
                "Blue images → Positive Z-axis",
                "Mixed colors → Intermediate positions",
            ],
        },
    ));
    events
}

fn movement_timeline() -> Vec<TimedEvent<DemoAction>> {
    let heading = demo_heading(DemoKind::Movement);
    let mut events = Vec::new();
    for (i, (position, description, hex)) in MOVEMENTS.iter().enumerate() {
        let at = MOVEMENT_INTERVAL * i as u32;
        events.push(TimedEvent::new(
            at,
            DemoAction::Explain {
                heading,
                paragraphs: vec![
                    format!("Step {}: {}", i + 1, description),
                    format!("Moving to position: {}", fmt_position(*position)),
                ],
            },
        ));
        events.push(TimedEvent::new(
            at,
            DemoAction::SpawnPoint {
                target: Vec3::from_array(*position),
                hex: *hex,
                label: description.to_string(),
                continue_from_last: true,
            },
        ));
    }
    events.push(TimedEvent::new(
        MOVEMENT_INTERVAL * MOVEMENTS.len() as u32,
        DemoAction::Conclude {
            notes: vec![
                "Key Insight: Image features directly control 3D position!",
                "This is how CNNs organize similar images in feature space.",
            ],
        },
    ));
    events
}

fn cluster_timeline() -> Vec<TimedEvent<DemoAction>> {
    let heading = demo_heading(DemoKind::Cluster);
    let mut events = Vec::new();
    for (i, (name, hex, points)) in CLUSTERS.iter().enumerate() {
        let at = CLUSTER_INTERVAL * i as u32;
        events.push(TimedEvent::new(
            at,
            DemoAction::Explain {
                heading,
                paragraphs: vec![
                    format!("Showing cluster: {}", name),
                    "Notice how similar images group together!".to_string(),
                ],
            },
        ));
        for (j, point) in points.iter().enumerate() {
            events.push(TimedEvent::new(
                at + CLUSTER_STAGGER * j as u32,
                DemoAction::SpawnPoint {
                    target: Vec3::from_array(*point),
                    hex: *hex,
                    label: format!("{} #{}", name, j + 1),
                    continue_from_last: false,
                },
            ));
        }
    }
    events.push(TimedEvent::new(
        CLUSTER_INTERVAL * CLUSTERS.len() as u32,
        DemoAction::Conclude {
            notes: vec![
                "Learning: Similar images form clusters!",
                "CNNs use this clustering to:",
                "Group similar objects together",
                "Distinguish between different categories",
                "Learn patterns from examples",
            ],
        },
    ));
    events
}

pub fn demo_timeline(kind: DemoKind) -> Vec<TimedEvent<DemoAction>> {
    match kind {
        DemoKind::Color => color_timeline(),
        DemoKind::Movement => movement_timeline(),
        DemoKind::Cluster => cluster_timeline(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_offsets(kind: DemoKind) -> Vec<Duration> {
        demo_timeline(kind)
            .into_iter()
            .filter(|e| matches!(e.action, DemoAction::SpawnPoint { .. }))
            .map(|e| e.at)
            .collect()
    }

    #[test]
    fn test_color_demo_spawns_every_two_seconds() {
        let offsets = spawn_offsets(DemoKind::Color);
        assert_eq!(offsets.len(), 5);
        assert_eq!(offsets[4], Duration::from_secs(8));
    }

    #[test]
    fn test_cluster_points_are_staggered() {
        let offsets = spawn_offsets(DemoKind::Cluster);
        assert_eq!(offsets.len(), 12);
        assert_eq!(offsets[1], Duration::from_millis(300));
        assert_eq!(offsets[4], Duration::from_millis(2000));
        assert_eq!(offsets[11], Duration::from_millis(4900));
    }

    #[test]
    fn test_every_demo_ends_with_its_conclusion() {
        for kind in DemoKind::ALL {
            let events = demo_timeline(kind);
            let last = events.iter().max_by_key(|e| e.at).map(|e| &e.action);
            assert!(matches!(last, Some(DemoAction::Conclude { .. })), "{:?}", kind);
        }
    }

    #[test]
    fn test_color_panel_shows_rgb_percentages() {
        let first = demo_timeline(DemoKind::Color).remove(0);
        match first.action {
            DemoAction::Explain { paragraphs, .. } => {
                assert_eq!(paragraphs[1], "RGB: (80%, 20%, 20%)");
                assert_eq!(paragraphs[2], "Position: (3, -1, -1)");
            }
            other => panic!("unexpected action {:?}", other),
        }
    }
}
