//! Expands the content block of the checked purchase plan and collapses the rest.
use storefront_core::{CollapseState, EXPANDED_OPTION_CLASS, OptionGroup, recompute_collapse_state};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::context::PageContext;
use crate::dom;
use crate::error::PageError;

const OPTION_SELECTOR: &str = ".product__subscription-option";
const LABEL_SELECTOR: &str = ".product__subscription-label";
const CONTENT_SELECTOR: &str = ".product__subscription-content";

fn plan_input_selector() -> String {
    format!("input[name=\"{}\"]", OptionGroup::PurchasePlan.input_name())
}

/// A plan option with both its radio and its content block present.
struct PlanOption {
    option: Element,
    input: HtmlInputElement,
    content: Element,
}

fn plan_options() -> Vec<PlanOption> {
    let Some(doc) = dom::document() else {
        return Vec::new();
    };
    let input_selector = plan_input_selector();
    dom::query_all(&doc, OPTION_SELECTOR)
        .into_iter()
        .filter_map(|option| {
            let input = dom::query_in(&option, LABEL_SELECTOR)
                .and_then(|label| dom::query_in(&label, &input_selector))
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())?;
            let content = dom::query_in(&option, CONTENT_SELECTOR)?;
            Some(PlanOption {
                option,
                input,
                content,
            })
        })
        .collect()
}

fn apply(plan: &PlanOption, state: CollapseState) {
    let style = state.style();
    dom::set_class(&plan.option, EXPANDED_OPTION_CLASS, state.expanded);
    dom::set_style(&plan.content, "visibility", style.visibility);
    dom::set_style(&plan.content, "opacity", style.opacity);
    dom::set_style(&plan.content, "height", style.height);
    dom::set_style(&plan.content, "pointer-events", style.pointer_events);
}

/// Re-derive every plan block's visibility from its radio.
///
/// Options missing their radio or content block are left untouched.
pub fn update_collapse_state() -> Vec<CollapseState> {
    let plans = plan_options();
    let checked: Vec<bool> = plans.iter().map(|plan| plan.input.checked()).collect();
    let states = recompute_collapse_state(&checked);
    for (plan, state) in plans.iter().zip(&states) {
        apply(plan, *state);
    }
    states
}

/// Re-run the collapse computation on the configured delays, for browsers
/// that restore form state after the first pass.
fn schedule_restore_retries(ctx: &PageContext) {
    let delays = ctx.config.restore_delays();
    if delays.is_empty() {
        return;
    }
    wasm_bindgen_futures::spawn_local(async move {
        let mut waited = 0;
        for delay in delays {
            if let Err(err) = dom::sleep_ms(delay.saturating_sub(waited)).await {
                log::warn!("collapse retry timer failed: {}", dom::js_error_message(&err));
                return;
            }
            waited = delay;
            update_collapse_state();
        }
    });
}

/// # Errors
/// Returns `PageError::Missing` when the page has no plan radios.
pub fn init(ctx: &PageContext) -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    let inputs = dom::query_all(&doc, &plan_input_selector());
    if inputs.is_empty() {
        return Err(PageError::Missing("input[name=\"subscription\"]"));
    }

    update_collapse_state();
    schedule_restore_retries(ctx);

    // The cart link listens on these radios itself.
    for input in inputs {
        dom::listen(&input, "change", |_| {
            update_collapse_state();
        });
    }
    Ok(())
}
