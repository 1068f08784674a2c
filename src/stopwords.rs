//! Embedded stopword lists.
//!
//! The set of languages with a list here is the set of supported languages:
//! page metadata can only switch extraction to one of these.

use std::collections::HashSet;
use std::sync::LazyLock;

const EN: &str = "a about above after again against all also am an and any are aren't as at be \
because been before being below between both but by can can't cannot could couldn't did didn't do \
does doesn't doing don't down during each few for from further had hadn't has hasn't have haven't \
having he he'd he'll he's her here here's hers herself him himself his how how's i i'd i'll i'm \
i've if in into is isn't it it's its itself just let's like many may me might more most much must \
mustn't my myself new no nor not now of off on once one only or other ought our ours ourselves out \
over own said same say says shan't she she'd she'll she's should shouldn't since so some still such \
than that that's the their theirs them themselves then there there's these they they'd they'll \
they're they've this those through to too two under until up upon us very was wasn't we we'd we'll \
we're we've were weren't what what's when when's where where's whether which while who who's whom \
why why's will with won't would wouldn't yet you you'd you'll you're you've your yours yourself \
yourselves";

const DE: &str = "aber alle allem allen aller alles als also am an ander andere anderem anderen \
anderer anderes auch auf aus bei bin bis bist da damit dann das dass dasselbe dazu dein deine dem \
den denn der des dessen dich die dies diese diesem diesen dieser dieses dir doch dort du durch ein \
eine einem einen einer eines einig er es etwas euch euer für gegen gewesen hab habe haben hat hatte \
hatten hier hin hinter ich ihm ihn ihnen ihr ihre im in indem ins ist jede jedem jeden jeder jedes \
jene jetzt kann kein keine können könnte machen man manche mein meine mich mir mit muss musste nach \
nicht nichts noch nun nur ob oder ohne sehr sein seine selbst sich sie sind so solche soll sollte \
sondern sonst über um und uns unser unter viel vom von vor während war waren warst was weg weil \
weiter welche wenn werde werden wie wieder will wir wird wirst wo wollen würde würden zu zum zur zwar \
zwischen";

const FR: &str = "a ai aie aient ait alors au aucun aussi autre aux avais avait avant avec avoir \
bon car ce cela celle celui ces cet cette ceux chaque ci comme comment dans de des du elle elles en \
encore est et été être eu fait faire fois font hors ici il ils je juste la le les leur leurs lui ma \
mais me même mes moi mon ne ni nos notre nous on ont ou où par parce pas peu peut plupart pour \
pourquoi qu quand que quel quelle quelles quels qui sa sans se sera ses si sien son sont sous sur \
ta tandis te tellement tels tes toi ton tous tout toute toutes très tu un une vos votre vous vu ça";

const ES: &str = "a al algo algunas algunos ante antes como con contra cual cuando de del desde \
donde durante e el ella ellas ellos en entre era erais eran eras eres es esa esas ese eso esos esta \
estaba estado estan estar estas este esto estos fue fueron ha habia han hasta hay la las le les lo \
los mas me mi mis mucho muy nada ni no nos nosotros o os otra otras otro otros para pero poco por \
porque que quien quienes se sea ser si sido sin sobre su sus también tanto te tiene tienen todo \
todos tu tus un una uno unos y ya yo";

const IT: &str = "a ad al alla alle allo agli ai anche avere aveva c che chi ci come con contro \
cui da dal dalla dalle dei del della delle dello di dove e ed era erano essere gli ha hanno i il in \
io la le lei lo loro lui ma mi mia mio ne negli nei nel nella nelle no noi non nostro o per perché \
più quale quando quella quelle quello questa queste questo se sei si sia siamo sono su sua sue sui \
sul sulla suo tra tu tutti tutto un una uno vi voi";

const PT: &str = "a ao aos as até com como da das de dela dele deles do dos e ela elas ele eles em \
entre era essa esse esta este eu foi for foram há isso isto já la lhe mais mas me mesmo meu minha \
muito na nas nem no nos nossa nosso não o os ou para pela pelo por qual quando que quem se sem ser \
seu sua são também te tem ter um uma você à às é";

const NL: &str = "aan al alles als altijd andere ben bij daar dan dat de der deze die dit doch doen \
door dus een eens en er ge geen geweest haar had heb hebben heeft hem het hier hij hoe hun iemand \
iets ik in is ja je kan kon kunnen maar me meer men met mij mijn moet na naar niet niets nog nu of \
om omdat onder ons ook op over reeds te tegen toch toen tot u uit uw van veel voor want waren was \
wat werd wezen wie wil worden wordt zal ze zelf zich zij zijn zo zonder zou";

static LISTS: LazyLock<Vec<(&'static str, HashSet<&'static str>)>> = LazyLock::new(|| {
    [("en", EN), ("de", DE), ("fr", FR), ("es", ES), ("it", IT), ("pt", PT), ("nl", NL)]
        .into_iter()
        .map(|(code, words)| (code, words.split_whitespace().collect()))
        .collect()
});

/// Language codes with an embedded stopword list.
#[must_use]
pub fn available_languages() -> Vec<&'static str> {
    LISTS.iter().map(|(code, _)| *code).collect()
}

/// Whether `language` (ISO 639-1, any case) has a stopword list.
#[must_use]
pub fn is_supported(language: &str) -> bool {
    let language = language.to_ascii_lowercase();
    LISTS.iter().any(|(code, _)| *code == language)
}

/// Stopwords for `language`; unknown languages fall back to English.
#[must_use]
pub fn for_language(language: &str) -> &'static HashSet<&'static str> {
    let language = language.to_ascii_lowercase();
    LISTS
        .iter()
        .find(|(code, _)| *code == language)
        .or_else(|| LISTS.first())
        .map(|(_, words)| words)
        .unwrap_or_else(|| &*EMPTY)
}

static EMPTY: LazyLock<HashSet<&'static str>> = LazyLock::new(HashSet::new);
