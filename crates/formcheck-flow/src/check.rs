//! The end-to-end form submission check.

use crate::error::{FlowError, Result};
use crate::extract::{extractor_for, ValueExtractor};
use crate::locators::PageLocators;
use crate::report::{FieldCheck, RunReport, Step};
use formcheck_browser::{wait_until_clickable, BrowserActions, BrowserEngine};
use formcheck_core::AppConfig;

type DriverResult<T> = formcheck_browser::Result<T>;

/// Fills the text-box form and verifies the echoed values.
pub struct FormSubmissionCheck {
    config: AppConfig,
    locators: PageLocators,
    extractor: Box<dyn ValueExtractor>,
}

impl FormSubmissionCheck {
    /// Create a check from validated configuration.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let extractor = extractor_for(config.verify.extractor);

        Ok(Self {
            config,
            locators: PageLocators::default(),
            extractor,
        })
    }

    /// Use a different DOM contract.
    #[must_use]
    pub fn with_locators(mut self, locators: PageLocators) -> Self {
        self.locators = locators;
        self
    }

    /// Use a different extraction strategy than the configured one.
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl ValueExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Configuration in effect.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Launch a browser and run the check against it.
    pub async fn run(&self) -> Result<RunReport> {
        let engine = BrowserEngine::launch(&self.config.browser, self.config.driver_path.as_deref())
            .await
            .map_err(FlowError::at(Step::Launch))?;

        self.run_with(engine).await
    }

    /// Run the check against an already acquired browser session.
    ///
    /// The session is closed exactly once, whatever the outcome. A failed
    /// close never replaces an earlier step error.
    pub async fn run_with<B: BrowserActions>(&self, mut browser: B) -> Result<RunReport> {
        let mut report = RunReport::start();

        let outcome = self.execute(&browser, &mut report).await;
        let teardown = browser.close().await;
        report.finish();

        match (outcome, teardown) {
            (Ok(()), Ok(())) => {
                report.complete(Step::Teardown);
                tracing::info!(
                    "All {} submitted values echoed back correctly",
                    report.checks.len()
                );
                Ok(report)
            }
            (Ok(()), Err(e)) => Err(FlowError::Teardown(e)),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                tracing::warn!("Browser teardown also failed: {}", close_err);
                Err(e)
            }
        }
    }

    async fn execute<B: BrowserActions>(&self, browser: &B, report: &mut RunReport) -> Result<()> {
        self.navigate(browser)
            .await
            .map_err(FlowError::at(Step::Navigate))?;
        report.complete(Step::Navigate);

        self.open_subsection(browser)
            .await
            .map_err(FlowError::at(Step::OpenSubsection))?;
        report.complete(Step::OpenSubsection);

        self.fill(browser).await.map_err(FlowError::at(Step::Fill))?;
        report.complete(Step::Fill);

        self.submit(browser)
            .await
            .map_err(FlowError::at(Step::Submit))?;
        report.complete(Step::Submit);

        self.verify(browser, report).await?;
        report.complete(Step::Verify);

        Ok(())
    }

    async fn navigate<B: BrowserActions>(&self, browser: &B) -> DriverResult<()> {
        tracing::info!("Opening {}", self.config.base_url);
        browser.navigate(&self.config.base_url).await?;
        browser.scroll_by(0, self.config.scroll.offset_px).await
    }

    async fn open_subsection<B: BrowserActions>(&self, browser: &B) -> DriverResult<()> {
        browser.click(&self.locators.section_card).await?;

        wait_until_clickable(
            browser,
            &self.locators.section_item,
            self.config.wait.timeout(),
            self.config.wait.poll_interval(),
        )
        .await?;

        browser.click(&self.locators.section_item).await
    }

    async fn fill<B: BrowserActions>(&self, browser: &B) -> DriverResult<()> {
        for (field, value) in self.config.record.fields() {
            tracing::debug!("Filling {}", field);
            browser.type_text(self.locators.input(field), value).await?;
        }
        Ok(())
    }

    async fn submit<B: BrowserActions>(&self, browser: &B) -> DriverResult<()> {
        browser.scroll_by(0, self.config.scroll.offset_px).await?;
        browser.click(&self.locators.submit).await
    }

    async fn verify<B: BrowserActions>(&self, browser: &B, report: &mut RunReport) -> Result<()> {
        for (field, expected) in self.config.record.fields() {
            let text = browser
                .text_within(&self.locators.results, self.locators.output(field))
                .await
                .map_err(FlowError::at(Step::Verify))?;

            let actual = self.extractor.extract(field, &text);
            let check = FieldCheck {
                field,
                expected: expected.to_string(),
                actual,
            };

            if !check.matches() {
                return Err(FlowError::Mismatch {
                    field,
                    expected: check.expected,
                    actual: check.actual,
                });
            }

            tracing::debug!("{} echoed correctly", field);
            report.checks.push(check);
        }
        Ok(())
    }
}
