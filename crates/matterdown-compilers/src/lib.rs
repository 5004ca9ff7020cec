//! Built-in compiler toolchains for matterdown.
//!
//! Each backend sits behind a cargo feature (`vue`, `react`), the crate
//! analog of an optional peer dependency: a disabled backend is simply not
//! installed, and a load requesting its mode fails with the descriptive
//! missing-toolchain error from `matterdown-core`.

#[cfg(any(feature = "vue", feature = "react"))]
mod html;

#[cfg(feature = "react")]
pub mod react;
#[cfg(feature = "vue")]
pub mod vue;

use matterdown_core::toolchain::Toolchains;

/// The built-in toolchains enabled at compile time.
pub fn toolchains() -> Toolchains {
    let toolchains = Toolchains::empty();
    #[cfg(feature = "vue")]
    let toolchains = toolchains.with_vue(std::sync::Arc::new(vue::TemplateCompiler::new()));
    #[cfg(feature = "react")]
    let toolchains = toolchains.with_react(std::sync::Arc::new(react::JsxTranspiler::new()));
    toolchains
}
