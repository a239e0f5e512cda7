/// Edge-triggered contact latch for a pair of bodies.
///
/// A handler attached to the pair should run once when the pair enters
/// `Colliding` and not again until a measurement has seen it `Separated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactState {
    /// The last measurement found the bodies apart
    #[default]
    Separated,

    /// The bodies have been overlapping since the handler last fired
    Colliding,
}

impl ContactState {
    /// Records a new measurement and returns true when it starts a new
    /// contact episode
    pub fn update(&mut self, colliding: bool) -> bool {
        let began = colliding && *self == Self::Separated;
        *self = if colliding { Self::Colliding } else { Self::Separated };
        began
    }

    pub fn is_colliding(&self) -> bool {
        *self == Self::Colliding
    }
}
