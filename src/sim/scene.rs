//! Renderer-agnostic frame snapshot
//!
//! The simulation describes what to draw as a flat, back-to-front list of
//! vector shapes. Hosts only translate these into draw calls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::background::Cloud;
use super::collectible::Star;
use super::obstacle::Obstacle;
use super::particle::{Particle, ParticleKind};
use super::physics::Rect;
use super::plane::Plane;
use super::powerup::{PowerUp, PowerUpKind};
use crate::consts::{PIPE_CAP_HEIGHT, PIPE_CAP_OVERHANG, PIPE_STRIPE_INSET, PIPE_STRIPE_SPACING};

/// Fill and stroke colours
pub mod palette {
    pub const SKY: &str = "#87CEEB";
    pub const PIPE_FILL: &str = "#228B22";
    pub const PIPE_STROKE: &str = "#1F5F1F";
    pub const PIPE_STRIPE: &str = "#1A4D1A";
    pub const PLANE_FILL: &str = "#FFFFFF";
    pub const PLANE_STROKE: &str = "#2c3e50";
    pub const STAR_FILL: &str = "#FFD700";
    pub const STAR_STROKE: &str = "#FFA500";
    pub const SHIELD_FILL: &str = "rgba(52, 152, 219, 0.8)";
    pub const SHIELD_STROKE: &str = "#FFFFFF";
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// One shape in the frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Drawable {
    /// Full-canvas background fill
    Sky,
    /// White puffs sharing one alpha
    Cloud { circles: Vec<Circle>, alpha: f32 },
    /// One pipe of an obstacle pair; the cap sits at the gap-facing end
    Pipe {
        body: Rect,
        cap: Rect,
        /// x positions of the vertical texture lines across `body`
        stripes: Vec<f32>,
        top: bool,
    },
    /// Shield pickup with its glyph
    Shield {
        center: Vec2,
        radius: f32,
        glyph: &'static str,
    },
    /// Five-pointed star, alternating outer and inner vertices
    Star { center: Vec2, points: [Vec2; 10] },
    /// Paper plane; `outline` and `keel` are in plane-local coordinates
    Plane {
        center: Vec2,
        rotation: f32,
        outline: [Vec2; 4],
        keel: [Vec2; 2],
        shielded: bool,
    },
    Particle {
        pos: Vec2,
        rotation: f32,
        size: f32,
        color: &'static str,
        alpha: f32,
        kind: ParticleKind,
    },
}

impl Drawable {
    pub fn cloud(cloud: &Cloud) -> Self {
        let origin = Vec2::new(cloud.x, cloud.y);
        Drawable::Cloud {
            circles: cloud
                .puffs
                .iter()
                .map(|p| Circle {
                    center: origin + p.offset,
                    radius: p.radius,
                })
                .collect(),
            alpha: cloud.alpha,
        }
    }

    /// Both pipes of an obstacle, top first
    pub fn pipes(obstacle: &Obstacle) -> [Self; 2] {
        let top = obstacle.top_pipe();
        let bottom = obstacle.bottom_pipe();
        [pipe(top, true), pipe(bottom, false)]
    }

    pub fn power_up(power_up: &PowerUp) -> Self {
        match power_up.kind {
            PowerUpKind::Shield => {
                let bb = power_up.bounding_box();
                Drawable::Shield {
                    center: bb.center(),
                    radius: bb.width / 2.0,
                    glyph: power_up.kind.glyph(),
                }
            }
        }
    }

    /// Star at its bobbing position
    pub fn star(star: &Star) -> Self {
        let center = Vec2::new(star.x, star.render_y());
        Drawable::Star {
            center,
            points: star_points(center, star.size, star.size / 2.0),
        }
    }

    pub fn plane(plane: &Plane) -> Self {
        let (w, h) = (plane.width, plane.height);
        Drawable::Plane {
            center: Vec2::new(plane.x + w / 2.0, plane.y + h / 2.0),
            rotation: plane.rotation,
            outline: [
                Vec2::new(w / 2.0, 0.0),
                Vec2::new(-w / 2.0, h / 3.0),
                Vec2::new(-w / 4.0, 0.0),
                Vec2::new(-w / 2.0, -h / 3.0),
            ],
            keel: [Vec2::new(w / 2.0, 0.0), Vec2::new(-w / 4.0, 0.0)],
            shielded: plane.shielded,
        }
    }

    pub fn particle(particle: &Particle) -> Self {
        Drawable::Particle {
            pos: particle.pos,
            rotation: particle.rotation,
            size: particle.size,
            color: particle.color(),
            alpha: particle.alpha(),
            kind: particle.kind,
        }
    }
}

fn pipe(body: Rect, top: bool) -> Drawable {
    let cap_y = if top {
        body.bottom() - PIPE_CAP_HEIGHT
    } else {
        body.y
    };
    let cap = Rect::new(
        body.x - PIPE_CAP_OVERHANG,
        cap_y,
        body.width + PIPE_CAP_OVERHANG * 2.0,
        PIPE_CAP_HEIGHT,
    );

    let mut stripes = Vec::new();
    let mut sx = body.x + PIPE_STRIPE_INSET;
    while sx < body.right() - PIPE_STRIPE_INSET {
        stripes.push(sx);
        sx += PIPE_STRIPE_SPACING;
    }

    Drawable::Pipe {
        body,
        cap,
        stripes,
        top,
    }
}

/// Vertices of a five-pointed star, the first pointing straight up
pub fn star_points(center: Vec2, outer: f32, inner: f32) -> [Vec2; 10] {
    std::array::from_fn(|i| {
        let angle = i as f32 * std::f32::consts::PI / 5.0 - std::f32::consts::FRAC_PI_2;
        let r = if i % 2 == 0 { outer } else { inner };
        center + Vec2::new(angle.cos(), angle.sin()) * r
    })
}

/// Back-to-front list of shapes for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub drawables: Vec<Drawable>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, drawable: Drawable) {
        self.drawables.push(drawable);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Drawable> {
        self.drawables.iter()
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Drawable;
    type IntoIter = std::slice::Iter<'a, Drawable>;

    fn into_iter(self) -> Self::IntoIter {
        self.drawables.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::DifficultyProfile;

    #[test]
    fn test_star_first_point_is_straight_up() {
        let points = star_points(Vec2::new(100.0, 100.0), 12.0, 6.0);
        assert!((points[0].x - 100.0).abs() < 1e-4);
        assert!((points[0].y - 88.0).abs() < 1e-4);
        for (i, p) in points.iter().enumerate() {
            let r = p.distance(Vec2::new(100.0, 100.0));
            let expected = if i % 2 == 0 { 12.0 } else { 6.0 };
            assert!((r - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_pipe_caps_face_the_gap() {
        let o = Obstacle::with_top_height(200.0, 600.0, &DifficultyProfile::NORMAL, 100.0);
        let [top, bottom] = Drawable::pipes(&o);

        match top {
            Drawable::Pipe { body, cap, stripes, top } => {
                assert!(top);
                assert_eq!(cap, Rect::new(195.0, 75.0, 70.0, 25.0));
                assert_eq!(body.height, 100.0);
                assert_eq!(stripes, vec![210.0, 225.0, 240.0]);
            }
            other => panic!("expected pipe, got {:?}", other),
        }
        match bottom {
            Drawable::Pipe { body, cap, top, .. } => {
                assert!(!top);
                assert_eq!(body.y, 250.0);
                assert_eq!(cap.y, 250.0);
            }
            other => panic!("expected pipe, got {:?}", other),
        }
    }

    #[test]
    fn test_plane_outline_is_local() {
        let mut plane = Plane::new(150.0, 300.0);
        plane.shielded = true;
        match Drawable::plane(&plane) {
            Drawable::Plane { center, outline, keel, shielded, .. } => {
                assert_eq!(center, Vec2::new(170.0, 315.0));
                assert_eq!(outline[0], Vec2::new(20.0, 0.0));
                assert_eq!(outline[1], Vec2::new(-20.0, 10.0));
                assert_eq!(keel[1], Vec2::new(-10.0, 0.0));
                assert!(shielded);
            }
            other => panic!("expected plane, got {:?}", other),
        }
    }

    #[test]
    fn test_shield_is_centred_in_its_box() {
        let p = PowerUp::new(PowerUpKind::Shield, 400.0, 200.0, -3.0);
        assert_eq!(
            Drawable::power_up(&p),
            Drawable::Shield {
                center: Vec2::new(415.0, 215.0),
                radius: 15.0,
                glyph: "S",
            }
        );
    }
}
