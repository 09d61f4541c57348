use crate::api::NotesClient;
use crate::app::AppServices;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Dialog, DialogBody, DialogFooter, DialogHeader, DialogTitle,
    Input, Label, Textarea,
};
use crate::models::{Note, NoteKind};
use crate::notes::{
    read_as_data_url, BrowserSpeech, DictationEvent, NotesSync, NotesView, SpeechError,
    SpeechToText, ViewFilter,
};
use crate::session::{log_out, use_session};
use crate::storage::{load_active_view, save_active_view, BrowserTokenStore};
use crate::util::{display_timestamp, set_timeout};
use icons::{House, LogOut, Maximize, Menu, Mic, Minimize, Pencil, Plus, Search, Star, Trash2};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use leptos_router::hooks::use_navigate;
use std::rc::Rc;
use std::str::FromStr;
use wasm_bindgen::JsCast;

/// Quiet period after the last keystroke in the detail modal before the note
/// is written back.
const AUTOSAVE_DELAY_MS: i32 = 800;

/// Handle the dashboard's event handlers share. Every mutation goes through the
/// backend and then replaces the list with a fresh fetch.
#[derive(Clone, Copy)]
struct NotesActions {
    view: RwSignal<NotesView>,
    sync: StoredValue<NotesSync<NotesClient>>,
    speech: StoredValue<BrowserSpeech, LocalStorage>,
}

impl NotesActions {
    fn install(self, notes: Option<Vec<Note>>) {
        if let Some(notes) = notes {
            self.view.update(|v| v.replace_notes(notes));
        }
    }

    fn refresh(self) {
        let sync = self.sync.get_value();
        spawn_local(async move {
            self.install(sync.refresh().await);
        });
    }

    fn persist(self, note: Note) {
        let Some(id) = note.id().map(str::to_string) else {
            return;
        };
        let sync = self.sync.get_value();
        spawn_local(async move {
            if let Ok(notes) = sync.update(&id, &note).await {
                self.install(notes);
            }
        });
    }

    fn save_draft(self) {
        let request = self.view.with_untracked(|v| v.save_request(display_timestamp()));
        let sync = self.sync.get_value();
        spawn_local(async move {
            // A failed save leaves the modal open with the draft intact.
            if let Ok(notes) = sync.save(&request).await {
                self.install(notes);
                self.close_composer();
            }
        });
    }

    fn close_composer(self) {
        self.speech.with_value(|s| s.stop());
        self.view.update(|v| v.close_composer());
    }

    fn toggle_recording(self) {
        if self.view.with_untracked(|v| v.recording) {
            self.speech
                .with_value(|s| self.view.update(|v| v.end_recording(s)));
            return;
        }

        let view = self.view;
        let on_event: Rc<dyn Fn(DictationEvent)> = Rc::new(move |event| {
            view.try_update(|v| v.apply_dictation(event));
        });
        let started = self
            .speech
            .with_value(|s| view.try_update(|v| v.begin_recording(s, on_event)));
        match started {
            Some(Err(e @ SpeechError::Unavailable)) => tracing::warn!("{e}"),
            Some(Err(e)) => tracing::error!("{e}"),
            _ => {}
        }
    }

    fn toggle_favorite(self, id: String) {
        if let Some(record) = self.view.try_update(|v| v.toggle_favorite(&id)).flatten() {
            self.persist(record);
        }
    }

    fn delete(self, id: String) {
        if id.is_empty() {
            return;
        }
        let sync = self.sync.get_value();
        spawn_local(async move {
            if let Ok(notes) = sync.delete(&id).await {
                self.install(notes);
            }
        });
    }

    fn edit_detail(self, edit: impl FnOnce(&mut Note)) {
        let Some(revision) = self.view.try_update(|v| v.edit_selected(edit)).flatten() else {
            return;
        };
        set_timeout(
            move || {
                if let Some(note) = self.view.try_update(|v| v.take_autosave(revision)).flatten() {
                    self.persist(note);
                }
            },
            AUTOSAVE_DELAY_MS,
        );
    }

    fn close_detail(self) {
        if let Some(note) = self.view.try_update(|v| v.close_detail()).flatten() {
            self.persist(note);
        }
    }

    fn set_filter(self, filter: ViewFilter) {
        save_active_view(filter);
        self.view.update(|v| v.set_filter(filter));
    }
}

fn selected_option(ev: &web_sys::Event) -> Option<String> {
    ev.target()?
        .dyn_ref::<web_sys::HtmlSelectElement>()
        .map(|select| select.value())
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = expect_context::<AppServices>();
    let session = use_session();
    let navigate = StoredValue::new(use_navigate());

    let actions = NotesActions {
        view: RwSignal::new(NotesView::with_filter(load_active_view())),
        sync: StoredValue::new(services.notes.clone()),
        speech: StoredValue::new_local(BrowserSpeech::default()),
    };
    let view = actions.view;

    actions.refresh();

    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        if view.with_untracked(|v| v.selected.is_some()) {
            actions.close_detail();
        } else if view.with_untracked(|v| v.composer_open) {
            actions.close_composer();
        }
    });

    on_cleanup(move || {
        key_handle.remove();
        actions.speech.with_value(|s| s.stop());
    });

    let auth = services.auth.clone();
    let on_logout = move |_| {
        let auth = auth.clone();
        spawn_local(async move {
            let event = log_out(&auth, &BrowserTokenStore).await;
            session.dispatch(event);
            navigate.with_value(|nav| nav("/login", Default::default()));
        });
    };

    view! {
        <div class="flex min-h-screen bg-background">
            <Sidebar actions=actions />

            <main class="flex min-w-0 flex-1 flex-col">
                <header class="flex items-center gap-3 border-b px-4 py-3">
                    <Button
                        class="md:hidden"
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:aria-label="Toggle sidebar"
                        on:click=move |_| view.update(|v| v.toggle_sidebar())
                    >
                        <Menu />
                    </Button>

                    <div class="relative flex-1">
                        <Search class="absolute left-2.5 top-2.5 size-4 text-muted-foreground" />
                        <Input
                            class="pl-8"
                            placeholder="Search notes..."
                            value=Signal::derive(move || view.with(|v| v.query.clone()))
                            on_input=move |q: String| view.update(|v| v.set_query(&q))
                        />
                    </div>

                    <Button size=ButtonSize::Sm on:click=move |_| view.update(|v| v.open_create())>
                        <Plus />
                        "Add Note"
                    </Button>
                    <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_logout>
                        <LogOut />
                        "Logout"
                    </Button>
                </header>

                <section class="flex-1 px-4 py-6">
                    <h1 class="mb-4 text-lg font-semibold">{move || view.with(|v| v.filter.title())}</h1>
                    <NotesGrid actions=actions />
                </section>
            </main>

            <ComposerModal actions=actions />
            <DetailModal actions=actions />
        </div>
    }
}

#[component]
fn Sidebar(actions: NotesActions) -> impl IntoView {
    let view = actions.view;
    let item = move |filter: ViewFilter| {
        move || {
            let active = view.with(|v| v.filter == filter);
            let variant = if active { ButtonVariant::Secondary } else { ButtonVariant::Ghost };
            let icon = match filter {
                ViewFilter::Home => view! { <House /> }.into_any(),
                ViewFilter::Favorites => view! { <Star /> }.into_any(),
            };
            view! {
                <Button
                    class="w-full justify-start"
                    variant=variant
                    size=ButtonSize::Sm
                    attr:aria-current=active.then_some("page")
                    on:click=move |_| actions.set_filter(filter)
                >
                    {icon}
                    {filter.title()}
                </Button>
            }
        }
    };

    view! {
        <aside
            data-name="Sidebar"
            class=move || {
                let hidden = if view.with(|v| v.sidebar_open) { "" } else { "hidden" };
                format!("{hidden} w-56 shrink-0 flex-col gap-1 border-r p-3 md:flex")
            }
        >
            <div class="mb-3 px-2 text-sm font-semibold">"AI Notes"</div>
            {item(ViewFilter::Home)}
            {item(ViewFilter::Favorites)}
        </aside>
    }
}

#[component]
fn NotesGrid(actions: NotesActions) -> impl IntoView {
    let view = actions.view;
    let visible_ids = move || {
        view.with(|v| {
            v.visible()
                .into_iter()
                .filter_map(|n| n.id().map(str::to_string))
                .collect::<Vec<String>>()
        })
    };

    view! {
        <Show
            when=move || !visible_ids().is_empty()
            fallback=move || view! {
                <div class="py-16 text-center">
                    <p class="text-sm font-medium">"No notes found"</p>
                    <p class="text-xs text-muted-foreground">{move || view.with(|v| v.empty_hint())}</p>
                </div>
            }
        >
            <div class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-3">
                <For
                    each=visible_ids
                    key=|id: &String| id.clone()
                    children=move |id: String| view! { <NoteCard actions=actions id=id /> }
                />
            </div>
        </Show>
    }
}

/// Card for the listed note with `id`. Renders from the current list and
/// resolves the record again on every click.
#[component]
fn NoteCard(actions: NotesActions, id: String) -> impl IntoView {
    let view = actions.view;
    let note = {
        let id = id.clone();
        Memo::new(move |_| view.with(|v| v.find(&id).cloned()))
    };
    let field = move |f: fn(&Note) -> String| note.with(|n| n.as_ref().map(f).unwrap_or_default());
    let favorite = move || note.with(|n| n.as_ref().is_some_and(|n| n.favorite));
    let is_audio = move || note.with(|n| n.as_ref().is_some_and(Note::is_audio));

    let id_detail = id.clone();
    let id_fav = id.clone();
    let id_edit = id.clone();

    view! {
        <article
            data-name="NoteCard"
            class="flex cursor-pointer flex-col gap-2 rounded-xl border bg-card p-4 shadow-sm hover:shadow-md"
            on:click=move |_| {
                view.update(|v| {
                    v.select_by_id(&id_detail);
                });
            }
        >
            <div class="flex items-start justify-between gap-2">
                <h3 class="line-clamp-1 font-medium">{move || field(|n| n.title.clone())}</h3>
                <span class="flex items-center gap-1 text-xs text-muted-foreground">
                    {move || if is_audio() { view! { <Mic class="size-4" /> }.into_any() } else { ().into_any() }}
                    <span class="rounded-full bg-muted px-2 py-0.5">{move || field(Note::kind_badge)}</span>
                </span>
            </div>
            {move || {
                note.with(|n| n.as_ref().and_then(|n| n.image.clone())).map(|src| {
                    view! { <img class="max-h-40 rounded-md object-cover" src=src alt="" /> }
                })
            }}
            <p class="line-clamp-4 text-sm text-muted-foreground">{move || field(|n| n.content.clone())}</p>
            <div class="mt-auto flex items-center justify-between text-xs text-muted-foreground">
                <span>{move || field(|n| n.timestamp.clone())}</span>
                <span class="flex gap-1" on:click=|ev| ev.stop_propagation()>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconSm
                        attr:aria-label=move || if favorite() { "Remove from favorites" } else { "Add to favorites" }
                        on:click=move |_| actions.toggle_favorite(id_fav.clone())
                    >
                        {move || {
                            let class = if favorite() { "fill-yellow-400 text-yellow-400" } else { "" };
                            view! { <Star class=class /> }
                        }}
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconSm
                        attr:aria-label="Edit note"
                        on:click=move |_| {
                            view.update(|v| {
                                v.open_edit_by_id(&id_edit);
                            });
                        }
                    >
                        <Pencil />
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconSm
                        attr:aria-label="Delete note"
                        on:click=move |_| actions.delete(id.clone())
                    >
                        <Trash2 />
                    </Button>
                </span>
            </div>
        </article>
    }
}

#[component]
fn ComposerModal(actions: NotesActions) -> impl IntoView {
    let view = actions.view;
    let draft_title = Signal::derive(move || view.with(|v| v.draft.title.clone()));
    let draft_content = Signal::derive(move || view.with(|v| v.draft.content.clone()));
    let is_audio = move || view.with(|v| v.draft.kind == NoteKind::Audio);
    let recording = move || view.with(|v| v.recording);

    let on_kind = move |ev: web_sys::Event| {
        if let Some(kind) = selected_option(&ev).and_then(|k| NoteKind::from_str(&k).ok()) {
            view.update(|v| v.draft.kind = kind);
        }
    };

    view! {
        <Dialog
            open=Signal::derive(move || view.with(|v| v.composer_open))
            on_close=move |_| actions.close_composer()
        >
            <DialogBody>
                <DialogHeader>
                    <DialogTitle>{move || if view.with(|v| v.editing) { "Edit Note" } else { "New Note" }}</DialogTitle>
                </DialogHeader>

                <div class="flex flex-col gap-1.5">
                    <Label html_for="note_title" class="text-xs">"Title"</Label>
                    <Input
                        id="note_title"
                        placeholder="Title"
                        autofocus=true
                        value=draft_title
                        on_input=move |t: String| view.update(|v| v.draft.title = t)
                    />
                </div>

                <div class="flex flex-col gap-1.5">
                    <Label html_for="note_type" class="text-xs">"Type"</Label>
                    <select
                        id="note_type"
                        class="h-9 rounded-md border bg-transparent px-3 text-sm"
                        prop:value=move || view.with(|v| v.draft.kind.to_string())
                        on:change=on_kind
                    >
                        <option value=NoteKind::Text.to_string()>"Text"</option>
                        <option value=NoteKind::Audio.to_string()>"Audio"</option>
                    </select>
                </div>

                <div class="flex flex-col gap-1.5">
                    <Label html_for="note_content" class="text-xs">"Content"</Label>
                    <Textarea
                        id="note_content"
                        placeholder="Write your note..."
                        value=draft_content
                        on_input=move |c: String| view.update(|v| v.draft.content = c)
                    />
                </div>

                <Show when=is_audio>
                    <div class="flex flex-col gap-2">
                        {move || {
                            let (variant, label) = if recording() {
                                (ButtonVariant::Recording, "Stop Recording")
                            } else {
                                (ButtonVariant::Outline, "Start Recording")
                            };
                            view! {
                                <Button
                                    variant=variant
                                    size=ButtonSize::Sm
                                    on:click=move |_| actions.toggle_recording()
                                >
                                    <Mic />
                                    {label}
                                </Button>
                            }
                        }}
                        <Show when=move || view.with(|v| !v.transcript.is_empty())>
                            <p class="rounded-md bg-muted px-3 py-2 text-sm">
                                {move || view.with(|v| v.transcript.clone())}
                            </p>
                        </Show>
                    </div>
                </Show>

                <DialogFooter>
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| actions.close_composer()>
                        "Cancel"
                    </Button>
                    <Button size=ButtonSize::Sm on:click=move |_| actions.save_draft()>
                        {move || if view.with(|v| v.editing) { "Update" } else { "Save" }}
                    </Button>
                </DialogFooter>
            </DialogBody>
        </Dialog>
    }
}

#[component]
fn DetailModal(actions: NotesActions) -> impl IntoView {
    let view = actions.view;
    let selected = move |f: fn(&Note) -> String| view.with(|v| v.selected.as_ref().map(f).unwrap_or_default());
    let fullscreen = move || view.with(|v| v.fullscreen);
    let favorite = move || view.with(|v| v.selected.as_ref().is_some_and(|n| n.favorite));

    let on_image = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            return;
        };
        let attach = move |data_url: String| {
            if let Some(note) = view.try_update(|v| v.attach_image(data_url)).flatten() {
                actions.persist(note);
            }
        };
        if let Err(e) = read_as_data_url(&file, attach) {
            tracing::error!("Error reading image: {e:?}");
        }
    };

    view! {
        <Dialog
            open=Signal::derive(move || view.with(|v| v.selected.is_some()))
            on_close=move |_| actions.close_detail()
            expanded=Signal::derive(fullscreen)
        >
            <DialogBody>
                <div class="flex items-center gap-1 pr-8">
                    <span class="flex-1 text-xs text-muted-foreground">{move || selected(|n| n.timestamp.clone())}</span>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconSm
                        attr:aria-label="Toggle favorite"
                        on:click=move |_| {
                            if let Some(id) = view.with_untracked(|v| v.selected.as_ref().and_then(|n| n.id().map(str::to_string))) {
                                actions.toggle_favorite(id);
                            }
                        }
                    >
                        {move || {
                            let class = if favorite() { "fill-yellow-400 text-yellow-400" } else { "" };
                            view! { <Star class=class /> }
                        }}
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconSm
                        attr:aria-label="Toggle fullscreen"
                        on:click=move |_| view.update(|v| v.toggle_fullscreen())
                    >
                        {move || if fullscreen() { view! { <Minimize /> }.into_any() } else { view! { <Maximize /> }.into_any() }}
                    </Button>
                </div>

                <Input
                    class="text-lg font-semibold"
                    value=Signal::derive(move || selected(|n| n.title.clone()))
                    on_input=move |t: String| actions.edit_detail(|n| n.title = t)
                />
                <Show when=move || view.with(|v| v.selected.as_ref().is_some_and(Note::is_audio))>
                    <div class="flex items-center gap-2 text-xs text-muted-foreground">
                        <Mic class="size-4" />
                        <span>{move || selected(Note::kind_badge)}</span>
                        <span>"Transcript"</span>
                    </div>
                </Show>
                <Textarea
                    rows=10
                    value=Signal::derive(move || selected(|n| n.content.clone()))
                    on_input=move |c: String| actions.edit_detail(|n| n.content = c)
                />

                {move || {
                    view.with(|v| v.selected.as_ref().and_then(|n| n.image.clone())).map(|src| {
                        view! { <img class="max-h-80 rounded-md object-contain" src=src alt="" /> }
                    })
                }}

                <Label class="text-xs text-muted-foreground">
                    "Attach image"
                    <input type="file" accept="image/*" class="text-xs" on:change=on_image />
                </Label>
            </DialogBody>
        </Dialog>
    }
}
