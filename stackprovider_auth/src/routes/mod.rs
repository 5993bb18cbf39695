mod assets;
mod gate;
mod policy;

pub use assets::StaticAssetFilter;
pub use gate::{GateDecision, GateRequest, SessionGate, callback_url_from_query};
pub use policy::{RouteClass, RouteConfig, RouteTable};

pub(crate) use policy::DEFAULT_AUTH_ROUTE_PREFIX;
