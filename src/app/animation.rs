//! Piece slide animation with cubic ease-out.
//!
//! A move is animated by drawing the moving piece between the centres of its
//! origin and destination tiles.  Castling also slides the rook, as a
//! secondary sprite on the same clock.

use std::time::{Duration, Instant};

use shakmaty::{Piece, Square};

use crate::core::board_geometry::BoardGeometry;

/// One sliding piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

impl Slide {
    /// Interpolated centre cell at eased progress `t` (0.0..=1.0).
    pub fn position(&self, geometry: &BoardGeometry, t: f64) -> (u16, u16) {
        let (x0, y0) = geometry.square_center(self.from);
        let (x1, y1) = geometry.square_center(self.to);
        (lerp(x0, x1, t), lerp(y0, y1, t))
    }
}

/// An in-flight move animation.
#[derive(Debug, Clone)]
pub struct MoveAnimation {
    pub primary: Slide,
    pub secondary: Option<Slide>,
    started: Instant,
    duration: Duration,
}

impl MoveAnimation {
    pub fn new(primary: Slide, secondary: Option<Slide>, started: Instant, duration: Duration) -> Self {
        Self {
            primary,
            secondary,
            started,
            duration,
        }
    }

    /// Eased progress in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let linear = now.saturating_duration_since(self.started).as_secs_f64()
            / self.duration.as_secs_f64();
        ease_out_cubic(linear.clamp(0.0, 1.0))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Squares whose resting piece must be hidden while the slide is drawn.
    pub fn hides(&self, sq: Square) -> bool {
        self.primary.to == sq || self.secondary.is_some_and(|s| s.to == sq)
    }

    pub fn slides(&self) -> impl Iterator<Item = &Slide> {
        std::iter::once(&self.primary).chain(self.secondary.as_ref())
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn lerp(a: u16, b: u16, t: f64) -> u16 {
    let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
    v.round().max(0.0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Color, Role};

    fn pawn_slide() -> Slide {
        Slide {
            piece: Piece {
                color: Color::White,
                role: Role::Pawn,
            },
            from: Square::E2,
            to: Square::E4,
        }
    }

    #[test]
    fn progress_eases_out_and_finishes() {
        let t0 = Instant::now();
        let anim = MoveAnimation::new(pawn_slide(), None, t0, Duration::from_millis(200));

        assert_eq!(anim.progress(t0), 0.0);
        let half = anim.progress(t0 + Duration::from_millis(100));
        assert!(half > 0.5, "ease-out is ahead of linear at the midpoint: {half}");
        assert!(!anim.is_finished(t0 + Duration::from_millis(199)));
        assert!(anim.is_finished(t0 + Duration::from_millis(200)));
        assert_eq!(anim.progress(t0 + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn zero_duration_is_instant() {
        let t0 = Instant::now();
        let anim = MoveAnimation::new(pawn_slide(), None, t0, Duration::ZERO);
        assert!(anim.is_finished(t0));
        assert_eq!(anim.progress(t0), 1.0);
    }

    #[test]
    fn slide_travels_between_tile_centres() {
        let g = BoardGeometry::new(0, 0, 5, 2, false);
        let slide = pawn_slide();
        assert_eq!(slide.position(&g, 0.0), g.square_center(Square::E2));
        assert_eq!(slide.position(&g, 1.0), g.square_center(Square::E4));
        let (_, y_mid) = slide.position(&g, 0.5);
        assert_eq!(y_mid, g.square_center(Square::E3).1);
    }

    #[test]
    fn destinations_are_hidden_while_sliding() {
        let rook = Slide {
            piece: Piece {
                color: Color::White,
                role: Role::Rook,
            },
            from: Square::H1,
            to: Square::F1,
        };
        let anim = MoveAnimation::new(pawn_slide(), Some(rook), Instant::now(), Duration::from_millis(250));
        assert!(anim.hides(Square::E4));
        assert!(anim.hides(Square::F1));
        assert!(!anim.hides(Square::E2));
        assert_eq!(anim.slides().count(), 2);
    }
}
