mod sky_renderer;

pub use sky_renderer::SkyRenderer;
