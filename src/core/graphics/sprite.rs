//=========================================================================
// Sprite
//
// The movable coloured rectangle drawn above the background. Position
// changes on directional input; size, colour and speed are fixed once
// constructed.
//
//=========================================================================

//=== Internal Imports ====================================================
use super::color::Color;

//=== Direction ===========================================================

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

//=== Sprite ==============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub x: i32,
    pub y: i32,
    width: u32,
    height: u32,
    color: Color,
    speed: u32,
}

impl Sprite {
    //--- Construction -----------------------------------------------------

    /// Creates a sprite at the origin.
    ///
    /// # Panics
    ///
    /// Panics if `width`, `height` or `speed` is zero.
    pub fn new(width: u32, height: u32, color: Color, speed: u32) -> Self {
        assert!(width > 0 && height > 0, "Sprite size must be positive, got {}x{}", width, height);
        assert!(speed > 0, "Sprite speed must be positive");

        Self {
            x: 0,
            y: 0,
            width,
            height,
            color,
            speed,
        }
    }

    /// Places the sprite at `(x, y)`.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    //--- Movement ---------------------------------------------------------

    /// Moves one step of `speed` pixels. Saturates at the `i32` range.
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.x = self.x.saturating_sub_unsigned(self.speed),
            Direction::Right => self.x = self.x.saturating_add_unsigned(self.speed),
            Direction::Up => self.y = self.y.saturating_sub_unsigned(self.speed),
            Direction::Down => self.y = self.y.saturating_add_unsigned(self.speed),
        }
    }
}

impl Default for Sprite {
    /// 10×10 white square at the origin moving 5 pixels per step.
    fn default() -> Self {
        Self::new(10, 10, Color::WHITE, 5)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sprite() {
        let sprite = Sprite::default();
        assert_eq!((sprite.x, sprite.y), (0, 0));
        assert_eq!((sprite.width(), sprite.height()), (10, 10));
        assert_eq!(sprite.color(), Color::WHITE);
        assert_eq!(sprite.speed(), 5);
    }

    #[test]
    fn step_moves_by_speed() {
        let mut sprite = Sprite::default().at(20, 20);

        sprite.step(Direction::Left);
        assert_eq!((sprite.x, sprite.y), (15, 20));
        sprite.step(Direction::Down);
        assert_eq!((sprite.x, sprite.y), (15, 25));
        sprite.step(Direction::Right);
        sprite.step(Direction::Up);
        assert_eq!((sprite.x, sprite.y), (20, 20));
    }

    #[test]
    fn step_can_leave_the_screen() {
        let mut sprite = Sprite::default();
        sprite.step(Direction::Up);
        assert_eq!(sprite.y, -5);
    }

    #[test]
    fn step_saturates() {
        let mut sprite = Sprite::default().at(i32::MIN + 1, i32::MAX - 1);
        sprite.step(Direction::Left);
        sprite.step(Direction::Down);
        assert_eq!((sprite.x, sprite.y), (i32::MIN, i32::MAX));
    }

    #[test]
    #[should_panic(expected = "Sprite speed must be positive")]
    fn zero_speed_panics() {
        Sprite::new(10, 10, Color::WHITE, 0);
    }

    #[test]
    #[should_panic(expected = "Sprite size must be positive")]
    fn zero_size_panics() {
        Sprite::new(0, 10, Color::WHITE, 1);
    }
}
