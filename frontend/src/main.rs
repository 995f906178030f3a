//! The expense tracker single-page app.

use common::{
    AccountSummary, Category, Expense, ExpenseID, ExpenseSummary, LoginRequest, NewExpenseRequest,
    RegisterRequest,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::{
    classes, function_component, html, use_effect_with, use_state, Callback, Html, InputEvent,
    MouseEvent, Properties, SubmitEvent, TargetCast,
};

use frontend::{api, AppContext, Theme, ViewMode};

fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

#[derive(Properties, PartialEq)]
struct AuthPageProps {
    on_authenticated: Callback<(AccountSummary, String)>,
}

/// The combined login/registration form shown while signed out.
#[function_component]
fn AuthPage(props: &AuthPageProps) -> Html {
    let is_login = use_state(|| true);
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |event: InputEvent| {
            username.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            email.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            password.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let toggle_mode = {
        let is_login = is_login.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            is_login.set(!*is_login);
        })
    };

    let onsubmit = {
        let is_login = is_login.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_authenticated = props.on_authenticated.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let logging_in = *is_login;
            let username = (*username).clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let error = error.clone();
            let loading = loading.clone();
            let on_authenticated = on_authenticated.clone();

            loading.set(true);
            error.set(None);

            spawn_local(async move {
                let result = if logging_in {
                    api::login(&LoginRequest {
                        username: Some(username),
                        password: Some(password),
                    })
                    .await
                } else {
                    api::register(&RegisterRequest {
                        username: Some(username),
                        email: Some(email),
                        password: Some(password),
                    })
                    .await
                };

                // The auth response has no creation timestamp, so fetch the
                // full account before handing the session to the app.
                match result {
                    Ok(auth) => match api::fetch_profile(&auth.token).await {
                        Ok(account) => on_authenticated.emit((account, auth.token)),
                        Err(api_error) => error.set(Some(api_error.to_string())),
                    },
                    Err(api_error) => error.set(Some(api_error.to_string())),
                }

                loading.set(false);
            });
        })
    };

    html! {
        <div class="auth-page">
            <h1>{"Expense Tracker"}</h1>
            <h2>{ if *is_login { "Log in" } else { "Create an account" } }</h2>

            if let Some(message) = (*error).clone() {
                <p class="error">{message}</p>
            }

            <form onsubmit={onsubmit}>
                <input
                    placeholder={ if *is_login { "Username or email" } else { "Username" } }
                    value={(*username).clone()}
                    oninput={on_username_input}
                />
                if !*is_login {
                    <input
                        type="email"
                        placeholder="Email"
                        value={(*email).clone()}
                        oninput={on_email_input}
                    />
                }
                <input
                    type="password"
                    placeholder="Password"
                    value={(*password).clone()}
                    oninput={on_password_input}
                />
                <button type="submit" disabled={*loading}>
                    { if *is_login { "Log in" } else { "Register" } }
                </button>
            </form>

            <button class="link" onclick={toggle_mode}>
                { if *is_login {
                    "Don't have an account? Register"
                } else {
                    "Already have an account? Log in"
                } }
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseFormProps {
    token: String,
    on_saved: Callback<()>,
}

/// The form for recording a new expense.
#[function_component]
fn ExpenseForm(props: &ExpenseFormProps) -> Html {
    let amount = use_state(String::new);
    let description = use_state(String::new);
    let category = use_state(|| Category::Food.to_string());
    let date = use_state(String::new);

    let on_amount_input = {
        let amount = amount.clone();
        Callback::from(move |event: InputEvent| {
            amount.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_description_input = {
        let description = description.clone();
        Callback::from(move |event: InputEvent| {
            description.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_category_change = {
        let category = category.clone();
        Callback::from(move |event: yew::Event| {
            category.set(event.target_unchecked_into::<HtmlSelectElement>().value());
        })
    };

    let on_date_input = {
        let date = date.clone();
        Callback::from(move |event: InputEvent| {
            date.set(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let onsubmit = {
        let amount = amount.clone();
        let description = description.clone();
        let category = category.clone();
        let date = date.clone();
        let token = props.token.clone();
        let on_saved = props.on_saved.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let payload = NewExpenseRequest {
                amount: amount.parse().ok(),
                description: Some((*description).clone()),
                category: Some((*category).clone()),
                // An empty date field means "today"; the server fills it in.
                date: (!date.is_empty()).then(|| (*date).clone()),
            };

            let amount = amount.clone();
            let description = description.clone();
            let date = date.clone();
            let token = token.clone();
            let on_saved = on_saved.clone();

            spawn_local(async move {
                match api::create_expense(&token, &payload).await {
                    Ok(_) => {
                        amount.set(String::new());
                        description.set(String::new());
                        date.set(String::new());
                        on_saved.emit(());
                    }
                    Err(api_error) => {
                        gloo_dialogs::alert(&format!("Error adding expense: {api_error}"));
                    }
                }
            });
        })
    };

    html! {
        <form class="expense-form" onsubmit={onsubmit}>
            <h2>{"Add Expense"}</h2>
            <input
                type="number"
                step="0.01"
                min="0.01"
                placeholder="Amount"
                value={(*amount).clone()}
                oninput={on_amount_input}
            />
            <input
                placeholder="Description"
                value={(*description).clone()}
                oninput={on_description_input}
            />
            <select value={(*category).clone()} onchange={on_category_change}>
                { for Category::ALL.iter().map(|option| html! {
                    <option value={option.to_string()} selected={option.as_str() == category.as_str()}>
                        {option.to_string()}
                    </option>
                }) }
            </select>
            <input type="date" value={(*date).clone()} oninput={on_date_input} />
            <button type="submit">{"Add"}</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct SummaryCardsProps {
    summary: ExpenseSummary,
}

/// The total spend and the per-category breakdown.
#[function_component]
fn SummaryCards(props: &SummaryCardsProps) -> Html {
    let summary = &props.summary;

    html! {
        <section class="summary">
            <div class="summary-total">
                <h2>{"Total Spent"}</h2>
                <p class="amount">{format_amount(summary.total)}</p>
                <p class="count">{format!("{} expenses", summary.count)}</p>
            </div>
            <div class="category-summary">
                { for summary.category_summary.iter().map(|entry| html! {
                    <div class="category-item" key={entry.category.as_str()}>
                        <span class="category-name">{entry.category.to_string()}</span>
                        <span class="category-total">{format_amount(entry.total)}</span>
                        <span class="category-count">{format!("{}×", entry.count)}</span>
                    </div>
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseCollectionProps {
    expenses: Vec<Expense>,
    view_mode: ViewMode,
    on_view_mode: Callback<ViewMode>,
    on_delete: Callback<ExpenseID>,
}

/// The caller's expenses as a grid of cards or a flat list.
#[function_component]
fn ExpenseCollection(props: &ExpenseCollectionProps) -> Html {
    let view_button = |mode: ViewMode, label: &str| {
        let on_view_mode = props.on_view_mode.clone();
        let active = props.view_mode == mode;

        html! {
            <button
                class={classes!("view-btn", active.then_some("active"))}
                onclick={Callback::from(move |_: MouseEvent| on_view_mode.emit(mode))}
            >
                {label}
            </button>
        }
    };

    let expense_entry = |expense: &Expense| {
        let on_delete = props.on_delete.clone();
        let id = expense.id;

        html! {
            <div class="expense" key={id.as_i64()}>
                <p class="description">{&expense.description}</p>
                <p class="amount">{format_amount(expense.amount)}</p>
                <span class="category-badge">{expense.category.to_string()}</span>
                <span class="date">{expense.date.to_string()}</span>
                <span class="owner">{&expense.username}</span>
                <button
                    class="delete-btn"
                    onclick={Callback::from(move |_: MouseEvent| on_delete.emit(id))}
                >
                    {"Delete"}
                </button>
            </div>
        }
    };

    html! {
        <section class="expenses">
            <div class="expenses-header">
                <h2>{"Your Expenses"}</h2>
                <div class="view-toggle">
                    { view_button(ViewMode::Grid, "Grid") }
                    { view_button(ViewMode::List, "List") }
                </div>
            </div>

            if props.expenses.is_empty() {
                <p class="empty">{"No expenses yet. Add your first one above."}</p>
            } else if props.view_mode == ViewMode::Grid {
                <div class="expenses-grid">
                    { for props.expenses.iter().map(expense_entry) }
                </div>
            } else {
                <div class="expenses-list">
                    { for props.expenses.iter().map(expense_entry) }
                </div>
            }
        </section>
    }
}

/// The application root: restores the persisted session and preferences,
/// and swaps between the auth page and the expense views.
#[function_component]
fn App() -> Html {
    let context = use_state(frontend::load_session);
    let theme = use_state(frontend::load_theme);
    let view_mode = use_state(frontend::load_view_mode);
    let expenses = use_state(Vec::<Expense>::new);
    let summary = use_state(ExpenseSummary::default);

    // Every mutation triggers a full refetch of the list and the summary;
    // there are no optimistic updates.
    let refresh = {
        let expenses = expenses.clone();
        let summary = summary.clone();

        Callback::from(move |token: String| {
            let expenses = expenses.clone();
            let summary = summary.clone();

            spawn_local(async move {
                match api::fetch_expenses(&token).await {
                    Ok(fetched) => expenses.set(fetched),
                    Err(api_error) => {
                        gloo_console::error!(format!("could not fetch expenses: {api_error}"));
                    }
                }

                match api::fetch_summary(&token).await {
                    Ok(fetched) => summary.set(fetched),
                    Err(api_error) => {
                        gloo_console::error!(format!("could not fetch the summary: {api_error}"));
                    }
                }
            });
        })
    };

    {
        let refresh = refresh.clone();
        let token = context.token.clone();

        use_effect_with((), move |_| {
            if let Some(token) = token {
                refresh.emit(token);
            }
        });
    }

    let on_authenticated = {
        let context = context.clone();
        let refresh = refresh.clone();

        Callback::from(move |(account, token): (AccountSummary, String)| {
            frontend::store_session(&account, &token);
            context.set(AppContext::signed_in(account, token.clone()));
            refresh.emit(token);
        })
    };

    let on_log_out = {
        let context = context.clone();
        let expenses = expenses.clone();
        let summary = summary.clone();

        Callback::from(move |_: MouseEvent| {
            frontend::clear_session();
            context.set(AppContext::default());
            expenses.set(Vec::new());
            summary.set(ExpenseSummary::default());
        })
    };

    let on_toggle_theme = {
        let theme = theme.clone();

        Callback::from(move |_: MouseEvent| {
            let next = (*theme).toggled();
            frontend::store_theme(next);
            theme.set(next);
        })
    };

    let on_view_mode = {
        let view_mode = view_mode.clone();

        Callback::from(move |mode: ViewMode| {
            frontend::store_view_mode(mode);
            view_mode.set(mode);
        })
    };

    let on_mutated = {
        let refresh = refresh.clone();
        let token = context.token.clone();

        Callback::from(move |_: ()| {
            if let Some(token) = token.clone() {
                refresh.emit(token);
            }
        })
    };

    let on_delete = {
        let token = context.token.clone();
        let on_mutated = on_mutated.clone();

        Callback::from(move |id: ExpenseID| {
            let Some(token) = token.clone() else {
                return;
            };
            let on_mutated = on_mutated.clone();

            spawn_local(async move {
                match api::delete_expense(&token, id).await {
                    Ok(()) => on_mutated.emit(()),
                    Err(_) => gloo_dialogs::alert("Error deleting expense"),
                }
            });
        })
    };

    html! {
        <div class={classes!("app", (*theme).css_class())}>
            {
                match (context.current_account.clone(), context.token.clone()) {
                    (Some(account), Some(token)) => html! {
                        <>
                            <header class="app-header">
                                <h1>{"Expense Tracker"}</h1>
                                <div class="header-actions">
                                    <span class="current-user">
                                        {format!("Signed in as {}", account.username)}
                                    </span>
                                    <button onclick={on_toggle_theme}>
                                        {(*theme).toggle_label()}
                                    </button>
                                    <button onclick={on_log_out}>{"Logout"}</button>
                                </div>
                            </header>

                            <SummaryCards summary={(*summary).clone()} />
                            <ExpenseForm token={token} on_saved={on_mutated.clone()} />
                            <ExpenseCollection
                                expenses={(*expenses).clone()}
                                view_mode={*view_mode}
                                on_view_mode={on_view_mode}
                                on_delete={on_delete}
                            />
                        </>
                    },
                    _ => html! {
                        <AuthPage on_authenticated={on_authenticated} />
                    },
                }
            }
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
