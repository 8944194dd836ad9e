use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::api::{execute, urlencoding, HttpSearchService};
use crate::config::SearchConfig;
use crate::format::{format_number, format_timestamp};
use crate::query::QUERY_PARAM;
use crate::state::{SearchResultsState, SearchTicket};

#[component]
pub fn SearchBar() -> impl IntoView {
    let initial = use_query_map()
        .get_untracked()
        .get(QUERY_PARAM)
        .unwrap_or_default();
    let (term, set_term) = signal(initial);
    let navigate = use_navigate();

    let submit = move || {
        let q = term.get_untracked();
        let q = q.trim();
        if q.is_empty() {
            return;
        }
        navigate(&format!("/search?{}={}", QUERY_PARAM, urlencoding(q)), Default::default());
    };
    let submit_on_enter = submit.clone();

    view! {
        <div class="search-box">
            <input
                type="text"
                placeholder="Search repositories (e.g., 'nginx', 'postgres')"
                prop:value=move || term.get()
                on:input=move |ev| {
                    set_term.set(event_target_value(&ev));
                }
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        submit_on_enter();
                    }
                }
            />
            <button on:click=move |_| submit()>"Search"</button>
        </div>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="app">
            <header>
                <h1>"Registry Search"</h1>
                <p class="subtitle">"Find container image repositories by name or description"</p>
            </header>
            <SearchBar />
        </div>
    }
}

#[component]
pub fn SearchResults() -> impl IntoView {
    let config = use_context::<SearchConfig>().unwrap_or_default();
    let service = StoredValue::new(HttpSearchService::new(config.api_base_url.clone()));
    let page_size_options = config.page_size_options.clone();
    let state = RwSignal::new(SearchResultsState::new(config.page_size));
    let params = use_query_map();

    let run = move |ticket: SearchTicket| {
        let service = service.get_value();
        leptos::task::spawn_local(async move {
            let outcome = execute(&service, ticket).await;
            // Writing the signal re-renders every reader.
            state.update(|s| {
                s.apply(outcome);
            });
        });
    };

    Effect::new(move |_| {
        let q = params.get().get(QUERY_PARAM);
        if let Some(ticket) = state.try_update(|s| s.on_query(q)).flatten() {
            run(ticket);
        }
    });

    let previous = move |_: leptos::ev::MouseEvent| {
        if let Some(ticket) = state.try_update(|s| s.previous_page()).flatten() {
            run(ticket);
        }
    };
    let next = move |_: leptos::ev::MouseEvent| {
        if let Some(ticket) = state.try_update(|s| s.next_page()).flatten() {
            run(ticket);
        }
    };

    let loading = move || state.with(|s| s.loading);

    view! {
        <Title text=move || state.with(|s| format!("Search: {}", s.query)) />
        <div class="app">
            <header>
                <h1>"Registry Search"</h1>
                <SearchBar />
            </header>

            {move || state.with(|s| s.error.clone()).map(|e| view! {
                <div class="error">
                    <strong>"Error: "</strong>{e.to_string()}
                </div>
            })}

            <div class="results-header">
                <span class="count">
                    {move || state.with(|s| {
                        let total = s.page_info.as_ref().map_or(0, |p| p.total_elements);
                        format!("{} repositories found for \"{}\"", format_number(total), s.query)
                    })}
                </span>
            </div>

            <div class="results">
                {move || {
                    if loading() {
                        view! { <div class="loading">"Loading repositories..."</div> }.into_any()
                    } else if state.with(|s| s.repos.is_empty()) {
                        view! { <div class="empty">"No repositories found. Try a different search."</div> }.into_any()
                    } else {
                        view! {
                            <table>
                                <thead>
                                    <tr>
                                        <th>"Repository"</th>
                                        <th>"Stars"</th>
                                        <th>"Pulls"</th>
                                        <th>"Updated"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {move || state.with(|s| s.repos.clone()).into_iter().map(|repo| {
                                        let description = repo.description.clone().unwrap_or_default();
                                        view! {
                                            <tr>
                                                <td class="repo-cell">
                                                    <span class="repo-name">{repo.full_name()}</span>
                                                    {repo.is_official.then(|| view! { <span class="badge official-badge">"Official"</span> })}
                                                    {(!repo.is_public).then(|| view! { <span class="badge private-badge">"Private"</span> })}
                                                    <p class="repo-description">{description}</p>
                                                </td>
                                                <td class="stat">{format_number(repo.star_count as u64)}</td>
                                                <td class="stat">{format_number(repo.pull_count)}</td>
                                                <td class="date">{format_timestamp(repo.updated_at)}</td>
                                            </tr>
                                        }
                                    }).collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }.into_any()
                    }
                }}
            </div>

            <div class="pagination">
                <button
                    on:click=previous
                    disabled=move || loading() || !state.with(|s| s.has_previous())
                >
                    "Previous"
                </button>
                <span class="page-label">{move || state.with(|s| s.page_label())}</span>
                <button
                    on:click=next
                    disabled=move || loading() || !state.with(|s| s.has_next())
                >
                    "Next"
                </button>
                <label>"Per page:"</label>
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        state.update(|s| s.on_page_size_change(size));
                    }
                }>
                    {page_size_options.into_iter().map(|size| {
                        view! {
                            <option value=size.to_string() selected=move || state.with(|s| s.page_size == size)>
                                {size}
                            </option>
                        }
                    }).collect::<Vec<_>>()}
                </select>
            </div>
        </div>
    }
}
