/// Caching decorators for outbound ports
mod caching_component_resolver;

pub use caching_component_resolver::CachingComponentResolver;
