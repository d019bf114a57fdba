mod flow;
mod vertex;

pub use flow::FLOW_FRAGMENT_SHADER;
pub use vertex::VERTEX_SHADER;
