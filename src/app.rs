mod about;
mod animate;
mod chrome;
mod contact;
mod experience;
mod frame;
mod hero;
mod hooks;
mod work;

use leptos::prelude::*;
use leptos_meta::*;

use crate::content::SITE;

use about::About;
use chrome::{Navbar, PageLoader, ScrollProgressBar, ScrollToTop};
use contact::{Contact, Footer};
use experience::Experience;
use frame::provide_frame_hub;
use hero::Hero;
use work::{Projects, Skills};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en" data-theme="dark">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="bg-background font-sans text-foreground antialiased">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    // One window measurement per frame for every animated component
    provide_frame_hub();

    let profile = &SITE.profile;

    view! {
        <Title text=format!("{} - {}", profile.name, profile.role) />
        <Meta name="description" content=profile.tagline.clone() />

        <PageLoader />
        <ScrollProgressBar />
        <Navbar />
        <main class="overflow-x-hidden">
            <Hero />
            <About />
            <Skills />
            <Projects />
            <Experience />
            <Contact />
        </main>
        <Footer />
        <ScrollToTop />
    }
}
