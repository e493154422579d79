use leptos::{ev::MouseEvent, html, prelude::*};

use crate::{
    content::{Project, SkillCategory, SITE},
    motion::{Variants, VisualTransform},
};

use super::{
    animate::{Reveal, TiltCard},
    hooks::{use_reveal_group, use_spring},
};

#[component]
pub fn Skills() -> impl IntoView {
    view! {
        <section id="skills" class="py-24">
            <div class="mx-auto max-w-6xl px-6">
                <Reveal class="mb-12 text-center">
                    <h2 class="text-3xl font-bold md:text-4xl">"Technical arsenal"</h2>
                </Reveal>
                <div class="grid gap-6 md:grid-cols-2">
                    {SITE
                        .skills
                        .iter()
                        .map(|category| view! { <SkillCard category=category /> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn SkillCard(category: &'static SkillCategory) -> impl IntoView {
    let motion = &SITE.motion;
    let node = NodeRef::<html::Div>::new();
    // the card itself, then each chip
    let reveal = use_reveal_group(node, &category.title, category.skills.len() + 1, motion.stagger);
    let card = Variants::fade_up(motion.reveal_distance);
    let chip = Variants::pop();

    view! {
        <div
            node_ref=node
            class="rounded-2xl border border-muted/20 bg-brightBlack/20 p-6"
            style=move || card.reveal_at(reveal.get(0)).to_css()
        >
            <h3 class=format!("mb-4 text-xl font-bold {}", category.accent)>
                {category.title.clone()}
            </h3>
            <div class="flex flex-wrap gap-2">
                {category
                    .skills
                    .iter()
                    .enumerate()
                    .map(|(i, skill)| {
                        view! {
                            <span
                                class="inline-block rounded-full border border-muted/30 px-3 py-1 text-sm"
                                style=move || chip.reveal_at(reveal.get(i + 1)).to_css()
                            >
                                {skill.clone()}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn Projects() -> impl IntoView {
    let motion = &SITE.motion;
    let projects = &SITE.projects;
    let node = NodeRef::<html::Div>::new();
    let reveal = use_reveal_group(node, "projects", projects.len(), motion.stagger);
    let rise = Variants::fade_up(motion.reveal_distance * 2.0);
    let selected = RwSignal::new(None::<usize>);

    view! {
        <section id="projects" class="py-24">
            <div class="mx-auto max-w-6xl px-6">
                <Reveal class="mb-12 text-center">
                    <h2 class="text-3xl font-bold md:text-4xl">"Featured projects"</h2>
                </Reveal>
                <div node_ref=node class="grid gap-8 md:grid-cols-2">
                    {projects
                        .iter()
                        .enumerate()
                        .map(|(i, project)| {
                            view! {
                                <div
                                    class="cursor-pointer"
                                    style=move || rise.reveal_at(reveal.get(i)).to_css()
                                    on:click=move |_| selected.set(Some(i))
                                >
                                    <ProjectCard project=project />
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <ProjectModal selected=selected />
        </section>
    }
}

#[component]
fn ProjectCard(project: &'static Project) -> impl IntoView {
    view! {
        <TiltCard class="rounded-2xl border border-muted/20 bg-brightBlack/20 p-8">
            <h3 class=format!("mb-3 text-2xl font-bold {}", project.accent)>
                {project.title.clone()}
            </h3>
            <p class="mb-6 leading-relaxed text-muted">{project.description.clone()}</p>
            <div class="mb-6 flex flex-wrap gap-2">{project_tags(project)}</div>
            {project_links(project)}
        </TiltCard>
    }
}

fn project_tags(project: &'static Project) -> impl IntoView {
    project
        .tags
        .iter()
        .map(|tag| {
            view! {
                <span class="rounded-md bg-muted/10 px-2 py-1 font-mono text-xs">{tag.clone()}</span>
            }
        })
        .collect_view()
}

fn project_links(project: &'static Project) -> impl IntoView {
    // following a link shouldn't also open the details
    let keep = |ev: MouseEvent| ev.stop_propagation();
    view! {
        <div class="flex gap-6 text-sm font-semibold">
            {project
                .link
                .clone()
                .map(|href| {
                    view! {
                        <a
                            href=href
                            target="_blank"
                            rel="noopener"
                            class="text-cyan hover:underline"
                            on:click=keep
                        >
                            "Live site ↗"
                        </a>
                    }
                })}
            {project
                .source
                .clone()
                .map(|href| {
                    view! {
                        <a
                            href=href
                            target="_blank"
                            rel="noopener"
                            class="text-purple hover:underline"
                            on:click=keep
                        >
                            "Source ↗"
                        </a>
                    }
                })}
        </div>
    }
}

/// Panel pose at `progress` (0.0 closed, 1.0 open): fades in rising from
/// `distance` px below while growing from 90%.
fn modal_transform(progress: f64, distance: f64) -> VisualTransform {
    let rise = Variants::fade_up(distance).reveal_at(progress);
    let grow = Variants::pop().reveal_at(0.9 + 0.1 * progress);
    VisualTransform {
        scale: grow.scale,
        ..rise
    }
}

/// Lock or release page scrolling behind an open modal.
fn set_scroll_lock(locked: bool) {
    let Some(body) = document().body() else {
        return;
    };
    let style = body.style();
    let result = if locked {
        style.set_property("overflow", "hidden")
    } else {
        style.remove_property("overflow").map(|_| ())
    };
    if let Err(e) = result {
        log::warn!("couldn't toggle scroll lock: {e:?}");
    }
}

/// Details of the selected project over a dimmed backdrop. Clicking the
/// backdrop or the close button clears the selection.
#[component]
fn ProjectModal(selected: RwSignal<Option<usize>>) -> impl IntoView {
    let motion = &SITE.motion;
    let distance = motion.reveal_distance;
    // keeps the last project on screen while the panel animates out
    let shown = RwSignal::new(None::<usize>);
    let open = Signal::derive(move || if selected.get().is_some() { 1.0 } else { 0.0 });
    let progress = use_spring(open, motion.pointer);

    Effect::new(move |_| {
        let current = selected.get();
        if current.is_some() {
            shown.set(current);
        }
        set_scroll_lock(current.is_some());
    });

    #[cfg(feature = "hydrate")]
    on_cleanup(|| set_scroll_lock(false));

    let close = move |_: MouseEvent| selected.set(None);
    let backdrop_style = move || {
        let p = progress.get();
        if selected.get().is_none() && p.abs() < 0.001 {
            "display: none;".to_string()
        } else {
            format!("opacity: {:.3};", p.clamp(0.0, 1.0))
        }
    };
    let project = move || shown.get().and_then(|i| SITE.projects.get(i));

    view! {
        <div
            class=move || {
                format!(
                    "fixed inset-0 z-50 flex items-center justify-center bg-black/60 p-6 backdrop-blur-sm {}",
                    if selected.get().is_some() { "" } else { "pointer-events-none" },
                )
            }
            style=backdrop_style
            on:click=close
        >
            <div
                role="dialog"
                aria-modal="true"
                class="relative w-full max-w-2xl rounded-2xl border border-muted/20 bg-background p-8 shadow-2xl"
                style=move || modal_transform(progress.get(), distance).to_css()
                on:click=|ev: MouseEvent| ev.stop_propagation()
            >
                <button
                    aria-label="Close"
                    class="absolute right-4 top-4 h-8 w-8 rounded-full text-muted transition-colors hover:bg-muted/10 hover:text-cyan"
                    on:click=close
                >
                    "✕"
                </button>
                {move || {
                    project()
                        .map(|project| {
                            view! {
                                <div class="mb-4 flex flex-wrap gap-2">{project_tags(project)}</div>
                                <h3 class=format!("mb-4 text-3xl font-bold {}", project.accent)>
                                    {project.title.clone()}
                                </h3>
                                <p class="mb-8 leading-relaxed text-muted">
                                    {project.description.clone()}
                                </p>
                                {project_links(project)}
                            }
                        })
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_starts_low_and_small() {
        let closed = modal_transform(0.0, 20.0);
        assert_eq!(closed.opacity, 0.0);
        assert_eq!(closed.translate_y, 20.0);
        assert!((closed.scale - 0.9).abs() < 1e-12);

        let open = modal_transform(1.0, 20.0);
        assert_eq!(open.opacity, 1.0);
        assert_eq!(open.translate_y, 0.0);
        assert!((open.scale - 1.0).abs() < 1e-12);

        let halfway = modal_transform(0.5, 20.0);
        assert_eq!(halfway.translate_y, 10.0);
        assert!((halfway.scale - 0.95).abs() < 1e-12);
    }
}
