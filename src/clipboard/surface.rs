//! Temporary selection surfaces for the legacy copy command
//!
//! The legacy copy command copies whatever is selected, so the fallback tiers
//! need something on the page to select. [`ScopedSurface`] owns that element
//! and releases it when dropped, whichever way the tier exits.

use super::TierFailure;

/// What kind of temporary element to materialize
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Off-screen container holding rendered html
    HtmlContainer,
    /// Text input holding plain text
    TextInput,
}

/// Environment able to host temporary surfaces and run the legacy copy command
pub trait SurfaceHost {
    type Surface;

    /// Create and attach a surface holding `content`
    fn create_surface(&self, kind: SurfaceKind, content: &str) -> Result<Self::Surface, TierFailure>;

    /// Make the surface's full contents the active selection
    fn select_contents(&self, surface: &Self::Surface) -> Result<(), TierFailure>;

    /// Run the legacy copy command; `Ok(false)` means the command was refused
    fn exec_copy(&self) -> Result<bool, TierFailure>;

    /// Detach the surface and drop any selection pointing into it
    fn release(&self, surface: Self::Surface);
}

/// A surface that is released on drop
pub struct ScopedSurface<'h, H: SurfaceHost> {
    host: &'h H,
    surface: Option<H::Surface>,
}

impl<'h, H: SurfaceHost> ScopedSurface<'h, H> {
    pub fn acquire(host: &'h H, kind: SurfaceKind, content: &str) -> Result<Self, TierFailure> {
        let surface = host.create_surface(kind, content)?;
        Ok(Self {
            host,
            surface: Some(surface),
        })
    }

    /// Select the surface and run the legacy copy command on it
    pub fn copy_selection(&self) -> Result<(), TierFailure> {
        let Some(surface) = self.surface.as_ref() else {
            return Err(TierFailure::Rejected("surface already released".to_string()));
        };

        self.host.select_contents(surface)?;
        if self.host.exec_copy()? {
            Ok(())
        } else {
            Err(TierFailure::Rejected("copy command was refused".to_string()))
        }
    }
}

impl<H: SurfaceHost> Drop for ScopedSurface<'_, H> {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.host.release(surface);
        }
    }
}
