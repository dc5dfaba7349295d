//! The navigation bar shown at the top of every signed-in page, and as a tab
//! bar along the bottom of the screen on small devices.

use maud::{Markup, html};

use crate::endpoints;

const DESKTOP_LINK_STYLE: &str = "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
    lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
    dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
    dark:hover:text-white lg:dark:hover:bg-transparent";
const DESKTOP_CURRENT_LINK_STYLE: &str = "block py-2 px-3 text-white bg-blue-700 rounded-sm
    lg:bg-transparent lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500";

const TAB_STYLE: &str = "flex w-full min-w-0 items-center justify-center rounded-lg
    px-2.5 py-2 text-xs font-semibold leading-tight text-gray-600 sm:px-4 sm:text-sm
    hover:bg-blue-50/70 hover:text-blue-700 dark:text-gray-300
    dark:hover:bg-blue-900/20 dark:hover:text-blue-200";
const CURRENT_TAB_STYLE: &str = "flex w-full min-w-0 items-center justify-center rounded-lg
    bg-blue-50 px-2.5 py-2 text-xs font-semibold leading-tight text-blue-700
    shadow-sm sm:px-4 sm:text-sm dark:bg-blue-900/30 dark:text-blue-200";

/// A link in the navigation bar, highlighted when it points at the current page.
struct Link {
    url: &'static str,
    title: &'static str,
    is_current: bool,
}

impl Link {
    fn new(url: &'static str, title: &'static str, current_page: &str) -> Self {
        Self {
            url,
            title,
            is_current: url == current_page,
        }
    }

    fn desktop_html(&self) -> Markup {
        let style = if self.is_current {
            DESKTOP_CURRENT_LINK_STYLE
        } else {
            DESKTOP_LINK_STYLE
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }

    fn tab_html(&self) -> Markup {
        let style = if self.is_current {
            CURRENT_TAB_STYLE
        } else {
            TAB_STYLE
        };

        html! {
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                span class="truncate" { (self.title) }
            }
        }
    }
}

pub struct NavBar {
    links: [Link; 3],
}

impl NavBar {
    /// The navigation bar for the page at `current_page`.
    ///
    /// Log out is never highlighted since it is an action, not a page.
    pub fn new(current_page: &str) -> Self {
        Self {
            links: [
                Link::new(endpoints::EXPENSES_VIEW, "Expenses", current_page),
                Link::new(endpoints::ANALYTICS_VIEW, "Analytics", current_page),
                Link {
                    url: endpoints::LOG_OUT,
                    title: "Log out",
                    is_current: false,
                },
            ],
        }
    }

    pub fn into_html(self) -> Markup {
        // Layout adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a href=(endpoints::ROOT) class="flex items-center"
                    {
                        span class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Expense Tracker"
                        }
                    }

                    ul class="hidden lg:flex lg:flex-row lg:space-x-8 font-medium"
                    {
                        @for link in &self.links {
                            li { (link.desktop_html()) }
                        }
                    }
                }
            }

            nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden" aria-label="Primary"
            {
                ul
                    class="mx-4 mb-4 grid grid-cols-3 gap-2 rounded-xl border border-gray-200
                    bg-white/95 px-4 py-3 shadow-lg backdrop-blur
                    dark:border-gray-700 dark:bg-gray-900/95"
                {
                    @for link in &self.links {
                        li class="min-w-0" { (link.tab_html()) }
                    }
                }
            }
        )
    }
}
