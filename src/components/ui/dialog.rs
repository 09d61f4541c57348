use icons::X;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::*;

mod components {
    use super::*;
    clx! {DialogBody, div, "flex flex-col gap-4"}
    clx! {DialogHeader, div, "flex flex-col gap-2 pr-8 text-left"}
    clx! {DialogTitle, h3, "text-lg leading-none font-semibold"}
    clx! {DialogFooter, footer, "flex flex-col-reverse gap-2 sm:flex-row sm:justify-end"}
}

pub use components::*;

/// Modal rendered while `open` is true. Clicking the backdrop or the close
/// button calls `on_close`; the caller owns the open flag. `expanded` switches
/// the panel to fill the viewport.
#[component]
pub fn Dialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional)] expanded: Option<Signal<bool>>,
    children: ChildrenFn,
) -> impl IntoView {
    let children = StoredValue::new(children);

    view! {
        <Show when=move || open.get()>
            <div
                data-name="DialogBackdrop"
                class="fixed inset-0 z-60 bg-black/50"
                on:click=move |_| on_close.run(())
            />
            <div
                data-name="DialogContent"
                role="dialog"
                aria-modal="true"
                class=move || {
                    let size = if expanded.is_some_and(|e| e.get()) {
                        "max-w-none w-screen h-screen max-h-screen rounded-none"
                    } else {
                        ""
                    };
                    tw_merge!(
                        "fixed top-[50%] left-[50%] z-100 translate-x-[-50%] translate-y-[-50%] w-full max-w-lg max-h-[85vh] overflow-y-auto rounded-2xl border bg-background p-6 shadow-lg",
                        size
                    )
                }
            >
                <button
                    type="button"
                    class="absolute top-4 right-4 rounded-sm p-1 opacity-70 hover:opacity-100 focus:outline-none focus:ring-2 focus:ring-ring"
                    aria-label="Close dialog"
                    on:click=move |_| on_close.run(())
                >
                    <X class="size-4" />
                </button>
                {move || children.with_value(|c| c())}
            </div>
        </Show>
    }
}
