use chrono::Utc;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use super::charts::{CategoryChart, MonthlyTrendChart};
use super::icons::{icon_log_out, icon_plus, icon_trash, icon_trending_up};
use super::AppServices;
use crate::aggregate::{category_totals, monthly_series, total_spend};
use crate::form::{ExpenseForm, FormPhase};
use crate::format::format_currency;
use crate::models::{Category, Expense, Identity};

#[derive(Properties, PartialEq)]
pub struct DashboardProps {
    pub identity: Identity,
    pub records: Rc<Vec<Expense>>,
}

#[function_component(Dashboard)]
pub fn dashboard(props: &DashboardProps) -> Html {
    let services = use_context::<AppServices>();
    let form = use_state(ExpenseForm::default);
    let phase = use_state(|| FormPhase::Idle);
    let form_error = use_state(|| None::<String>);
    let prediction = use_state(|| None::<f64>);
    let Some(services) = services else {
        return html! {};
    };

    let owner_id = props.identity.id.clone();

    let on_logout = {
        let auth = services.auth.clone();
        Callback::from(move |_| {
            let auth = auth.clone();
            spawn_local(async move {
                // the identity is cleared locally either way
                if let Err(err) = auth.logout().await {
                    tracing::warn!("Logout did not complete cleanly: {}", err);
                }
            });
        })
    };

    let on_submit = {
        let store = services.store.clone();
        let form = form.clone();
        let phase = phase.clone();
        let form_error = form_error.clone();
        let owner_id = owner_id.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *phase == FormPhase::Submitting {
                return;
            }
            let draft = match form.to_draft() {
                Ok(draft) => draft,
                Err(err) => {
                    form_error.set(Some(err.to_string()));
                    return;
                }
            };
            form_error.set(None);
            phase.set(FormPhase::Submitting);

            let store = store.clone();
            let form = form.clone();
            let phase = phase.clone();
            let owner_id = owner_id.clone();
            spawn_local(async move {
                let outcome = store.add(&draft, &owner_id).await;
                form.set(form.after_submit(&outcome));
                phase.set(FormPhase::Idle);
            });
        })
    };

    let on_predict = {
        let store = services.store.clone();
        let prediction = prediction.clone();
        Callback::from(move |_| {
            let store = store.clone();
            let prediction = prediction.clone();
            spawn_local(async move {
                if let Some(value) = store.predict().await {
                    prediction.set(Some(value));
                }
            });
        })
    };

    let on_delete = {
        let store = services.store.clone();
        let owner_id = owner_id.clone();
        move |id: String| {
            let store = store.clone();
            let owner_id = owner_id.clone();
            Callback::from(move |_: MouseEvent| {
                let store = store.clone();
                let owner_id = owner_id.clone();
                let id = id.clone();
                spawn_local(async move {
                    let _ = store.delete(&id, &owner_id).await;
                });
            })
        }
    };

    let totals = category_totals(&props.records);
    let trend = monthly_series(&props.records, Utc::now());
    let spent = total_spend(&props.records);

    let field = |update: fn(&mut ExpenseForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            update(&mut next, input.value());
            form.set(next);
        })
    };

    let on_category = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.category = select.value();
            form.set(next);
        })
    };

    html! {
        <>
            <header class="app-header">
                <h1>{"💸 Smart Expense Tracker"}</h1>
                <p>{ format!("Welcome, {}", props.identity.display_label) }</p>
                <p class="total-spend">{ format!("Total spent: {}", format_currency(spent)) }</p>
                <button onclick={on_logout}>{ icon_log_out() }{"Logout"}</button>
            </header>

            <form class="expense-form" onsubmit={on_submit}>
                <input
                    type="text"
                    placeholder="Title"
                    required={true}
                    value={form.title.clone()}
                    oninput={field(|f, v| f.title = v)}
                />
                <input
                    type="number"
                    step="any"
                    placeholder="Amount"
                    required={true}
                    value={form.amount.clone()}
                    oninput={field(|f, v| f.amount = v)}
                />
                <select onchange={on_category}>
                    <option value="" selected={form.category.is_empty()}>{"-- Select Category (or leave blank for AI) --"}</option>
                    { for Category::PRESETS.into_iter().map(|c| html! {
                        <option value={c.label().to_string()} selected={form.category == c.label()}>{ c.label().to_string() }</option>
                    }) }
                </select>
                <button type="submit">{ icon_plus() }{"Add"}</button>
                if let Some(msg) = &*form_error {
                    <p class="form-error">{ msg.clone() }</p>
                }
            </form>

            <ul class="expense-list">
                { for props.records.iter().map(|exp| html! {
                    <li key={exp.id.clone()}>
                        <div>
                            <p><strong>{ exp.title.clone() }</strong>{ format!(" - {}", format_currency(exp.amount)) }</p>
                            <p>{ exp.category.to_string() }</p>
                        </div>
                        <button onclick={on_delete(exp.id.clone())}>{ icon_trash() }{"Delete"}</button>
                    </li>
                }) }
            </ul>

            <div class="prediction">
                <button class="predict-btn" onclick={on_predict}>{ icon_trending_up() }{"Predict Next Month Spend"}</button>
                if let Some(value) = *prediction {
                    <p class="prediction-value">
                        {"📊 Estimated Next Month Spending: "}<b>{ format_currency(value) }</b>
                    </p>
                }
            </div>

            <CategoryChart totals={totals} />
            <MonthlyTrendChart points={trend} />
        </>
    }
}
