/// Route `tracing` events to the browser console and make panics readable.
///
/// Call once, before anything logs.
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    tracing::info!("RentHub frontend v{} starting", env!("CARGO_PKG_VERSION"));
}
