use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::Value;

use super::binding::FieldOptions;
use super::codec::{CustomCodec, FieldCodec};
use super::controller::{Form, FormError, FormResult, FormStatus, read_cell, write_cell};
use super::model::{FieldKey, FieldLens, FormModel};
use super::registry::{ControlHandle, ControlRef};
use super::validation::ValidatorOutcome;
use crate::components::{Alert, Fieldset};
use crate::contracts::{ControlValue, FormControl};
use crate::element::Element;
use crate::style::{FieldLayout, FormType, HorizRatio, form_classes};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMethod {
    Get,
    #[default]
    Post,
}

impl FormMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            FormMethod::Get => "get",
            FormMethod::Post => "post",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormEnctype {
    UrlEncoded,
    Multipart,
    Plain,
}

impl FormEnctype {
    pub const fn as_str(self) -> &'static str {
        match self {
            FormEnctype::UrlEncoded => "application/x-www-form-urlencoded",
            FormEnctype::Multipart => "multipart/form-data",
            FormEnctype::Plain => "text/plain",
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormPanelOptions {
    pub method: FormMethod,
    pub action: Option<String>,
    pub enctype: Option<FormEnctype>,
    pub name: Option<String>,
    pub target: Option<String>,
    pub novalidate: bool,
    pub autocomplete: Option<bool>,
    pub form_type: Option<FormType>,
    pub condensed: bool,
    pub horiz_ratio: HorizRatio,
}

impl FormPanelOptions {
    pub fn field_layout(&self) -> FieldLayout {
        FieldLayout::for_form(self.form_type, self.horiz_ratio)
    }
}

#[derive(Clone, Debug)]
enum Slot {
    Field(FieldKey),
    Static(Element),
}

/// One top-level entry of the rendered form body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LayoutGroup {
    Field(FieldKey),
    Static(Element),
    Fieldset {
        legend: String,
        fields: Vec<FieldKey>,
    },
}

struct PanelView {
    options: FormPanelOptions,
    slots: Vec<Slot>,
    alert: Alert,
    render_generation: u64,
}

/// Visual form: a [`Form`] plus layout, fieldsets and the alert region.
pub struct FormPanel<K: FormModel> {
    form: Form<K>,
    view: Rc<RefCell<PanelView>>,
}

impl<K: FormModel> Clone for FormPanel<K> {
    fn clone(&self) -> Self {
        Self {
            form: self.form.clone(),
            view: self.view.clone(),
        }
    }
}

impl<K: FormModel> Default for FormPanel<K> {
    fn default() -> Self {
        Self::new(FormPanelOptions::default())
    }
}

impl<K: FormModel> FormPanel<K> {
    pub fn new(options: FormPanelOptions) -> Self {
        Self::with_form(Form::new(), options)
    }

    pub fn with_form(form: Form<K>, options: FormPanelOptions) -> Self {
        Self {
            form,
            view: Rc::new(RefCell::new(PanelView {
                options,
                slots: Vec::new(),
                alert: Alert::new(),
                render_generation: 0,
            })),
        }
    }

    pub fn form(&self) -> &Form<K> {
        &self.form
    }

    pub fn options(&self) -> FormResult<FormPanelOptions> {
        Ok(read_cell(&self.view, "reading panel options")?.options.clone())
    }

    pub fn add<L, C>(
        &self,
        lens: L,
        mut control: C,
        options: FieldOptions<C>,
    ) -> FormResult<ControlRef<C>>
    where
        L: FieldLens<K>,
        L::Value: FieldCodec<C::Value>,
        C: FormControl,
    {
        control.apply_layout(self.field_layout()?);
        let control = self.form.add(lens, control, options)?;
        self.place(lens.key())?;
        Ok(control)
    }

    pub fn add_custom<L, C>(
        &self,
        lens: L,
        mut control: C,
        codec: CustomCodec<L::Value>,
        options: FieldOptions<C>,
    ) -> FormResult<ControlRef<C>>
    where
        L: FieldLens<K>,
        C: FormControl<Value = String>,
    {
        control.apply_layout(self.field_layout()?);
        let control = self.form.add_custom(lens, control, codec, options)?;
        self.place(lens.key())?;
        Ok(control)
    }

    /// Appends non-field content such as buttons or help text.
    pub fn add_static(&self, element: Element) -> FormResult<()> {
        write_cell(&self.view, "adding static content")?
            .slots
            .push(Slot::Static(element));
        self.schedule_rerender()
    }

    pub fn remove(&self, key: FieldKey) -> FormResult<bool> {
        let removed = self.form.remove(key)?;
        write_cell(&self.view, "removing field slot")?
            .slots
            .retain(|slot| !matches!(slot, Slot::Field(existing) if *existing == key));
        if removed {
            self.schedule_rerender()?;
        }
        Ok(removed)
    }

    /// Unbinds every field. Static content stays.
    pub fn remove_all(&self) -> FormResult<usize> {
        let removed = self.form.remove_all()?;
        write_cell(&self.view, "removing field slots")?
            .slots
            .retain(|slot| matches!(slot, Slot::Static(_)));
        self.schedule_rerender()?;
        Ok(removed)
    }

    pub fn get_control(&self, key: FieldKey) -> FormResult<Option<ControlHandle>> {
        self.form.get_control(key)
    }

    pub fn control_as<C: FormControl>(&self, key: FieldKey) -> FormResult<Option<ControlRef<C>>> {
        self.form.control_as(key)
    }

    pub fn get(&self, key: FieldKey) -> FormResult<Option<ControlValue>> {
        self.form.get(key)
    }

    pub fn set_data(&self, model: &K) -> FormResult<()> {
        self.form.set_data(model)
    }

    pub fn clear_data(&self) -> FormResult<()> {
        self.form.clear_data()
    }

    pub fn get_data(&self) -> FormResult<K> {
        self.form.get_data()
    }

    pub fn get_data_json(&self) -> FormResult<Value> {
        self.form.get_data_json()
    }

    pub fn status(&self) -> FormResult<FormStatus> {
        self.form.status()
    }

    /// Validates the form; with `mark_fields` the alert region follows the
    /// form-level error.
    pub fn validate(&self, mark_fields: bool) -> FormResult<bool> {
        let valid = self.form.validate(mark_fields)?;
        if mark_fields {
            let form_error = self.form.form_error()?;
            let mut view = write_cell(&self.view, "updating alert")?;
            match form_error {
                Some(message) => view.alert.show(message),
                None => view.alert.hide(),
            }
            drop(view);
            self.schedule_rerender()?;
        }
        Ok(valid)
    }

    pub fn alert(&self) -> FormResult<Alert> {
        Ok(read_cell(&self.view, "reading alert")?.alert.clone())
    }

    pub fn set_method(&self, value: FormMethod) -> FormResult<()> {
        self.update_options(|options| options.method = value)
    }

    pub fn set_action(&self, value: Option<String>) -> FormResult<()> {
        self.update_options(|options| options.action = value)
    }

    pub fn set_enctype(&self, value: Option<FormEnctype>) -> FormResult<()> {
        self.update_options(|options| options.enctype = value)
    }

    pub fn set_name(&self, value: Option<String>) -> FormResult<()> {
        self.update_options(|options| options.name = value)
    }

    pub fn set_target(&self, value: Option<String>) -> FormResult<()> {
        self.update_options(|options| options.target = value)
    }

    pub fn set_novalidate(&self, value: bool) -> FormResult<()> {
        self.update_options(|options| options.novalidate = value)
    }

    pub fn set_autocomplete(&self, value: Option<bool>) -> FormResult<()> {
        self.update_options(|options| options.autocomplete = value)
    }

    pub fn set_condensed(&self, value: bool) -> FormResult<()> {
        self.update_options(|options| options.condensed = value)
    }

    /// Restyles every bound control when the form is horizontal.
    pub fn set_horiz_ratio(&self, value: HorizRatio) -> FormResult<()> {
        self.update_options(|options| options.horiz_ratio = value)?;
        let layout = self.field_layout()?;
        for key in self.form.keys()? {
            if let Some(control) = self.form.get_control(key)? {
                control
                    .try_borrow_mut()
                    .map_err(|_| FormError::ControlBusy {
                        key,
                        context: "restyling control",
                    })?
                    .apply_layout(layout);
            }
        }
        Ok(())
    }

    pub fn set_validator<F, R>(&self, validator: F) -> FormResult<()>
    where
        F: Fn(&Form<K>) -> R + 'static,
        R: ValidatorOutcome,
    {
        self.form.set_validator(validator)?;
        self.schedule_rerender()
    }

    pub fn set_validator_message<F, M>(&self, message: F) -> FormResult<()>
    where
        F: Fn(&Form<K>) -> M + 'static,
        M: Into<Option<String>>,
    {
        self.form.set_validator_message(message)?;
        self.schedule_rerender()
    }

    pub fn schedule_rerender(&self) -> FormResult<()> {
        let mut view = write_cell(&self.view, "scheduling rerender")?;
        view.render_generation = view.render_generation.wrapping_add(1);
        Ok(())
    }

    pub fn render_generation(&self) -> FormResult<u64> {
        Ok(read_cell(&self.view, "reading render generation")?.render_generation)
    }

    /// Folds the ordered slots into fieldsets. Consecutive fields with the
    /// same legend share one; anything else closes the open run.
    pub fn groups(&self) -> FormResult<Vec<LayoutGroup>> {
        let bound = self.form.keys()?;
        let slots = {
            let mut view = write_cell(&self.view, "grouping fields")?;
            // Fields unbound through the form handle leave their slot behind.
            view.slots.retain(|slot| match slot {
                Slot::Field(key) => bound.contains(key),
                Slot::Static(_) => true,
            });
            view.slots.clone()
        };
        let mut groups: Vec<LayoutGroup> = Vec::with_capacity(slots.len());
        for slot in slots {
            let next = match slot {
                Slot::Static(element) => LayoutGroup::Static(element),
                Slot::Field(key) => match self.form.legend(key)? {
                    None => LayoutGroup::Field(key),
                    Some(legend) => {
                        if let Some(LayoutGroup::Fieldset {
                            legend: open,
                            fields,
                        }) = groups.last_mut()
                        {
                            if *open == legend {
                                fields.push(key);
                                continue;
                            }
                        }
                        LayoutGroup::Fieldset {
                            legend,
                            fields: vec![key],
                        }
                    }
                },
            };
            groups.push(next);
        }
        Ok(groups)
    }

    pub fn render(&self) -> FormResult<Element> {
        let groups = self.groups()?;
        let (options, alert) = {
            let view = read_cell(&self.view, "rendering form")?;
            (view.options.clone(), view.alert.clone())
        };

        let mut form = Element::new("form")
            .attr("method", options.method.as_str())
            .attr_opt("action", options.action.clone())
            .attr_opt("enctype", options.enctype.map(FormEnctype::as_str))
            .attr_opt("name", options.name.clone())
            .attr_opt("target", options.target.clone())
            .attr_opt(
                "autocomplete",
                options
                    .autocomplete
                    .map(|enabled| if enabled { "on" } else { "off" }),
            )
            .flag("novalidate", options.novalidate)
            .classes(form_classes(options.form_type, options.condensed))
            .child(alert.render());

        for group in groups {
            let rendered = match group {
                LayoutGroup::Static(element) => Some(element),
                LayoutGroup::Field(key) => self.render_control(key)?,
                LayoutGroup::Fieldset { legend, fields } => {
                    let mut fieldset = Fieldset::new(legend);
                    for key in fields {
                        if let Some(control) = self.render_control(key)? {
                            fieldset.add_child(control);
                        }
                    }
                    Some(fieldset.render())
                }
            };
            form = form.child_opt(rendered);
        }
        Ok(form)
    }

    fn render_control(&self, key: FieldKey) -> FormResult<Option<Element>> {
        let Some(control) = self.form.get_control(key)? else {
            return Ok(None);
        };
        let control = control.try_borrow().map_err(|_| FormError::ControlBusy {
            key,
            context: "rendering control",
        })?;
        Ok(Some(control.render()))
    }

    fn field_layout(&self) -> FormResult<FieldLayout> {
        Ok(read_cell(&self.view, "reading field layout")?
            .options
            .field_layout())
    }

    /// Moves `key` to the end of the layout, dropping any slot left by a
    /// replaced binding.
    fn place(&self, key: FieldKey) -> FormResult<()> {
        {
            let mut view = write_cell(&self.view, "placing field")?;
            view.slots
                .retain(|slot| !matches!(slot, Slot::Field(existing) if *existing == key));
            view.slots.push(Slot::Field(key));
        }
        self.schedule_rerender()
    }

    fn update_options(&self, update: impl FnOnce(&mut FormPanelOptions)) -> FormResult<()> {
        update(&mut write_cell(&self.view, "updating panel options")?.options);
        self.schedule_rerender()
    }
}
