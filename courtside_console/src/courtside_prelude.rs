// Scoreboard concepts, exposed directly. Auxiliary concerns (storage,
// command parsing) stay behind namespaces.

pub use courtside::clock::*;
pub use courtside::director::*;
pub use courtside::display::*;
pub use courtside::event::*;
pub use courtside::persistence::*;
pub use courtside::state::*;
pub use courtside::team::*;
