//! Tree folder: survey pages ⇄ questionnaire item tree.
//!
//! A survey is exactly two levels deep (page → element) while a questionnaire item tree can
//! nest groups to any depth. Going to FHIR, each page becomes one `group` item. Coming back,
//! every node that holds children becomes its own page and nested groups surface as sibling
//! pages, because a survey cannot express nesting.

use crate::config::ConverterConfig;
use crate::mapping::{element_to_item, item_to_element};
use crate::warnings::{ConversionWarning, WarningSink};
use fhir::r4::{ItemType, Questionnaire, QuestionnaireItem};
use survey_fhir_types::Identifier;
use surveyjs::{SurveyDocument, SurveyPage};

/// Fold survey pages into questionnaire group items.
///
/// Pages without a name, and pages left with no convertible elements, are dropped.
pub fn fold_survey(survey: &SurveyDocument, sink: &mut dyn WarningSink) -> Vec<QuestionnaireItem> {
    if survey.pages.is_empty() {
        sink.report(ConversionWarning::SurveyWithoutPages);
    }

    let mut groups = Vec::with_capacity(survey.pages.len());

    for (index, page) in survey.pages.iter().enumerate() {
        let Some(name) = Identifier::from_optional(page.name.as_deref()) else {
            sink.report(ConversionWarning::PageWithoutName { index });
            continue;
        };

        let items: Vec<QuestionnaireItem> = page
            .elements
            .iter()
            .filter_map(|element| element_to_item(element, sink))
            .collect();

        if items.is_empty() {
            sink.report(ConversionWarning::EmptyPage {
                name: name.into_inner(),
            });
            continue;
        }

        groups.push(QuestionnaireItem {
            link_id: Some(name.into_inner()),
            text: page.title.clone(),
            item_type: Some(ItemType::Group.as_str().to_string()),
            item: Some(items),
            ..Default::default()
        });
    }

    groups
}

/// A node whose children become one survey page: the questionnaire root or a group item.
struct PageSource<'a> {
    name: Option<&'a str>,
    title: Option<&'a str>,
    items: &'a [QuestionnaireItem],
}

impl<'a> PageSource<'a> {
    fn root(questionnaire: &'a Questionnaire) -> Self {
        Self {
            name: questionnaire.name.as_deref(),
            title: questionnaire.title.as_deref(),
            items: &questionnaire.item,
        }
    }

    fn group(item: &'a QuestionnaireItem, children: &'a [QuestionnaireItem]) -> Self {
        Self {
            name: item.link_id.as_deref(),
            title: item.text.as_deref(),
            items: children,
        }
    }
}

/// Unfold a questionnaire item tree into a flat list of survey pages.
///
/// The pages of the groups nested inside a node come before the node's own page.
pub fn unfold_questionnaire(
    questionnaire: &Questionnaire,
    config: &ConverterConfig,
    sink: &mut dyn WarningSink,
) -> Vec<SurveyPage> {
    let mut pages = Vec::new();
    unfold_node(PageSource::root(questionnaire), None, config, sink, &mut pages);
    pages
}

fn unfold_node(
    node: PageSource<'_>,
    inherited_title: Option<&str>,
    config: &ConverterConfig,
    sink: &mut dyn WarningSink,
    pages: &mut Vec<SurveyPage>,
) {
    // Nearest enclosing title wins when the node has none of its own.
    let title = node.title.or(inherited_title);

    let mut elements = Vec::new();
    let mut nested_pages = Vec::new();

    for item in node.items {
        match &item.item {
            Some(children) => unfold_node(
                PageSource::group(item, children),
                title,
                config,
                sink,
                &mut nested_pages,
            ),
            None => elements.extend(item_to_element(item, config, sink)),
        }
    }

    pages.append(&mut nested_pages);
    if !elements.is_empty() {
        pages.push(SurveyPage {
            name: node.name.map(str::to_string),
            title: title.map(str::to_string),
            elements,
        });
    }
}
