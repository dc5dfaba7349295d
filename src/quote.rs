//! A dismissible popup with a money-saving quote.
//!
//! The page holds an empty container that htmx fills from [get_quote] three
//! seconds after load and again every twenty seconds. Each fill plays a CSS
//! animation that hides the popup after eight seconds.

use axum::response::{IntoResponse, Response};
use maud::{Markup, PreEscaped, html};
use time::OffsetDateTime;

use crate::{endpoints, html::HeadElement};

/// How long each quote stays current, in seconds.
const QUOTE_SLOT_SECONDS: i64 = 20;

const QUOTES: &[&str] = &[
    "A budget is telling your money where to go, instead of wondering where it went.",
    "Beware of little expenses; a small leak will sink a great ship.",
    "Do not save what is left after spending, but spend what is left after saving.",
    "The habit of saving is itself an education.",
    "Frugality includes all the other virtues.",
    "A penny saved is a penny earned.",
    "Save a little money each month, and at the end of the year, you'll be surprised at how little you have.",
    "It's not your salary that makes you rich; it's your spending habits.",
    "The quickest way to double your money is to fold it in half and put it back in your pocket.",
    "Money looks better in the bank than on your feet.",
    "Spend less than you earn, and invest the rest wisely.",
    "If you buy things you don't need, you will soon sell things you need.",
    "He who buys what he does not need steals from himself.",
    "The art is not in making money but in keeping it.",
    "Money grows on the tree of patience.",
    "A fool and his money are soon parted.",
    "It's good to have money and the things that money can buy, but it's good to check up once in a while to make sure you haven't lost the things money can't buy.",
    "Money is only a tool. It will take you wherever you wish, but it will not replace you as the driver.",
    "You must gain control over your money, or the lack of it will forever control you.",
    "Financial peace isn't the acquisition of stuff. It's learning to live on less than you make.",
    "An investment in knowledge pays the best interest.",
    "The best way to save money is not to lose it.",
    "Don't tell me where your priorities are. Show me where you spend your money, and I'll tell you what they are.",
    "Wealth consists not in having great possessions, but in having few wants.",
    "Balancing your money is the key to having enough.",
    "Do not underestimate the value of doing nothing.",
    "A wise person should have money in their head, but not in their heart.",
    "The more you learn, the more you earn.",
    "Happiness is not in the mere possession of money; it lies in the joy of achievement.",
    "Money often costs too much.",
    "Don't go broke trying to look rich.",
    "Spend your money on the things that money can't buy: love, health, and happiness.",
    "The way to wealth is as plain as the way to market.",
    "You can be young without money, but you can't be old without it.",
    "Live like no one else, so later you can live like no one else.",
    "Rich people stay rich by living like they are broke.",
    "Saving is a fine thing. Especially when your parents have done it for you.",
    "Debt is like any other trap; easy enough to get into, but hard enough to get out of.",
    "Never spend your money before you have it.",
    "Without frugality, none can be rich, and with it, very few would be poor.",
    "You don't have to be smarter than the next person; you have to be more disciplined.",
    "The stock market is a device for transferring money from the impatient to the patient.",
    "If saving money is wrong, I don't want to be right.",
    "It's not how much money you make, but how much money you keep.",
    "Riches are not an end of life, but an instrument of life.",
    "It is not the man who has too little, but the man who craves more, that is poor.",
    "Too many people spend money they haven't earned, to buy things they don't want, to impress people they don't like.",
    "The desire of gold is not for gold. It is for the means of freedom and benefit.",
    "Every time you borrow money, you're robbing your future self.",
    "Spend less than you earn, invest the rest, and avoid debt.",
    "Invest in yourself, it pays the best dividends.",
    "Be fearful when others are greedy and greedy when others are fearful.",
    "The rich invest in time; the poor invest in money.",
    "Do not let your spending overtake your savings.",
    "Learn to manage your money, or the lack of it will manage you.",
    "Do not spend more than you earn. It's a simple rule with big consequences.",
    "A goal without a plan is just a wish.",
    "Money is a terrible master but an excellent servant.",
    "Don't let making a living prevent you from making a life.",
    "The real measure of your wealth is how much you'd be worth if you lost all your money.",
    "You can't have everything you want, but you can have the things that really matter.",
    "When you understand that your self-worth is not defined by your net worth, then you'll have financial freedom.",
    "True financial freedom is achieved by living below your means and building wealth.",
    "The more money you make, the more you need to learn to manage it.",
    "Wealth is not about having a lot of money; it's about having a lot of options.",
    "Stop chasing money and start chasing freedom.",
    "Never let the fear of losing be greater than the excitement of winning.",
    "The secret to saving is spending wisely.",
    "Being frugal doesn't mean being cheap. It means being resourceful.",
    "Don't watch the clock; do what it does. Keep going, and keep saving.",
    "Money is a great servant but a terrible master.",
    "The best investment you can make is in yourself.",
    "It's not just about saving money; it's about creating the life you want.",
];

/// The quote for the twenty second slot that `time` falls in.
pub fn quote_for(time: OffsetDateTime) -> &'static str {
    let slot = time.unix_timestamp().div_euclid(QUOTE_SLOT_SECONDS);
    // `rem_euclid` keeps the index in range for times before the epoch.
    let index = slot.rem_euclid(QUOTES.len() as i64) as usize;

    QUOTES[index]
}

/// The empty popup container to place once on a page.
pub fn quote_container() -> Markup {
    html! {
        div
            id="quote-popup"
            hx-get=(endpoints::QUOTE_API)
            hx-trigger="load delay:3s, every 20s"
            hx-swap="innerHTML"
            class="fixed bottom-4 right-4 z-50 w-64"
        {}
    }
}

/// The styles for the popup's show-then-hide animation.
pub fn quote_style() -> HeadElement {
    HeadElement::Style(PreEscaped(
        r#"
        @keyframes quote-lifetime {
            0% { opacity: 0; transform: translateY(1rem); }
            5% { opacity: 1; transform: translateY(0); }
            95% { opacity: 1; }
            100% { opacity: 0; visibility: hidden; }
        }

        .quote-card {
            animation: quote-lifetime 8s ease-in-out forwards;
        }
        "#
        .to_owned(),
    ))
}

fn quote_card(quote: &str) -> Markup {
    html! {
        div
            data-quote="true"
            class="quote-card flex flex-col items-center gap-2 p-4 rounded-xl shadow-lg
                text-white text-center bg-gradient-to-br from-blue-400 to-green-400"
        {
            span class="text-2xl" aria-hidden="true" { "👛" }

            p class="text-sm font-medium" { (quote) }

            button
                type="button"
                class="px-3 py-1 text-xs font-bold text-blue-500 bg-white rounded hover:bg-blue-50"
                onclick="this.closest('[data-quote]').remove()"
            {
                "Dismiss"
            }
        }
    }
}

/// Route handler for the next quote popup.
pub async fn get_quote() -> Response {
    quote_card(quote_for(OffsetDateTime::now_utc())).into_response()
}
